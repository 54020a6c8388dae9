macro_rules! nutype_string {
    ($ident:ident $(( $($args:tt)* ))?) => {
        #[::nutype::nutype(
            $($($args)*,)?
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Hash,
                Deref,
                TryFrom,
                Serialize,
                Deserialize,
            )
        )]
        pub struct $ident(String);
    };
}

macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deref,
            From,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(::uuid::Uuid);
    };
}

/// Defines a closed catalog of options shown to the user, serialized as their
/// display label.
macro_rules! catalog {
    ($(#[doc = $doc:literal])* $vis:vis enum $ident:ident { $($variant:ident => $label:literal),* $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        $vis enum $ident {
            $(
                #[serde(rename = $label)]
                $variant,
            )*
        }

        impl $ident {
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
            pub const LABELS: &'static [&'static str] = &[$($label),*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl ::std::fmt::Display for $ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ident {
            type Err = $crate::UnknownCatalogEntry;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)*
                    _ => Err($crate::UnknownCatalogEntry(s.into())),
                }
            }
        }
    };
}

pub(crate) use {catalog, id, nutype_string};
