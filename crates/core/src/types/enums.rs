/// An enumeration whose constants can be injected by name
///
/// Matching is exact and case-sensitive against [`ConfigEnum::VARIANTS`].
/// Fieldless enums usually get this trait from [`config_enum!`](crate::config_enum).
pub trait ConfigEnum: Sized + Send + 'static {
    /// Declared constant names, in declaration order
    const VARIANTS: &'static [&'static str];

    /// Look up a constant by its exact name
    fn from_variant(name: &str) -> Option<Self>;

    /// Name of this constant
    fn variant_name(&self) -> &'static str;
}

/// Declare a fieldless enum and implement [`ConfigEnum`] for it
///
/// ```rust
/// confix_core::config_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Mode {
///         Fast,
///         Safe,
///     }
/// }
///
/// use confix_core::ConfigEnum;
/// assert_eq!(Mode::from_variant("Safe"), Some(Mode::Safe));
/// assert_eq!(Mode::Fast.variant_name(), "Fast");
/// ```
#[macro_export]
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::ConfigEnum for $name {
            const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn from_variant(name: &str) -> ::core::option::Option<Self> {
                match name {
                    $(stringify!($variant) => ::core::option::Option::Some(Self::$variant),)+
                    _ => ::core::option::Option::None,
                }
            }

            fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }
    };
}
