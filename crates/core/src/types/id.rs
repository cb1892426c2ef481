//! Newtype IDs for type-safe entity references.
//!
//! The backend hands out opaque string identifiers (document IDs). Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing IDs
//! from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use sweet_delights_core::define_id;
/// define_id!(BakerId);
/// define_id!(OvenId);
///
/// let baker = BakerId::new("65f0c2a1");
/// let oven = OvenId::new("65f0c2a1");
///
/// // These are different types, so this won't compile:
/// // let _: BakerId = oven;
/// assert_eq!(baker.as_str(), oven.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);

/// Number of trailing characters shown as the customer-facing order number.
const ORDER_SHORT_CODE_LEN: usize = 8;

impl OrderId {
    /// The last eight characters of the ID, as printed on "Order #xxxxxxxx".
    ///
    /// IDs shorter than eight characters are returned whole.
    #[must_use]
    pub fn short_code(&self) -> &str {
        let count = self.0.chars().count();
        let skip = count.saturating_sub(ORDER_SHORT_CODE_LEN);
        self.0
            .char_indices()
            .nth(skip)
            .map_or("", |(start, _)| &self.0[start..])
    }
}
