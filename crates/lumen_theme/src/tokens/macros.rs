//! Token set generator
//!
//! `token_set!` expands one token category into:
//! - a key enum with stable kebab-case names,
//! - a complete token struct (every key has a value),
//! - a partial struct where every key is optional, used for inheritance
//!   layers and runtime overrides.

macro_rules! token_set {
    (
        $(#[$doc:meta])*
        $set:ident / $partial:ident : $key:ident => $value:ty {
            $( $variant:ident => $field:ident = $name:literal ),+ $(,)?
        }
    ) => {
        /// Token keys for dynamic access
        #[derive(
            Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $key {
            $( #[serde(rename = $name)] $variant, )+
        }

        impl $key {
            /// Every key, in scale order
            pub const ALL: &'static [$key] = &[ $( $key::$variant, )+ ];

            /// Stable name used in config files and variable maps
            pub fn name(self) -> &'static str {
                match self {
                    $( $key::$variant => $name, )+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some($key::$variant), )+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $key {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $set {
            $( #[serde(rename = $name)] pub $field: $value, )+
        }

        impl $set {
            /// Get a value by token key
            pub fn get(&self, token: $key) -> &$value {
                match token {
                    $( $key::$variant => &self.$field, )+
                }
            }

            pub fn set(&mut self, token: $key, value: $value) {
                match token {
                    $( $key::$variant => self.$field = value, )+
                }
            }

            /// Replace every value the partial set defines
            pub fn apply(&mut self, partial: &$partial) {
                $(
                    if let Some(value) = &partial.$field {
                        self.$field = value.clone();
                    }
                )+
            }

            pub fn iter(&self) -> impl Iterator<Item = ($key, &$value)> + '_ {
                $key::ALL.iter().map(move |token| (*token, self.get(*token)))
            }
        }

        #[doc = concat!("Partial [`", stringify!($set), "`]: unset keys fall through to lower layers")]
        #[derive(Clone, Debug, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct $partial {
            $(
                #[serde(rename = $name, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$value>,
            )+
        }

        impl $partial {
            pub fn get(&self, token: $key) -> Option<&$value> {
                match token {
                    $( $key::$variant => self.$field.as_ref(), )+
                }
            }

            pub fn set(&mut self, token: $key, value: $value) {
                match token {
                    $( $key::$variant => self.$field = Some(value), )+
                }
            }

            /// Builder form of [`Self::set`]
            pub fn with(mut self, token: $key, value: $value) -> Self {
                self.set(token, value);
                self
            }

            /// Layer `other` on top of `self`; keys set in `other` win
            pub fn merge(&mut self, other: &Self) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )+
            }

            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }

            /// Number of keys set
            pub fn len(&self) -> usize {
                0 $( + usize::from(self.$field.is_some()) )+
            }
        }

        impl From<&$set> for $partial {
            fn from(set: &$set) -> Self {
                Self {
                    $( $field: Some(set.$field.clone()), )+
                }
            }
        }
    };
}
