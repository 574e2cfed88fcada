//! Fixed vocabularies (roles, categories, statuses).
//!
//! Each enum is stored as TEXT in the database and travels over the wire in
//! its canonical upper-case form, e.g. `NO_SHOW` or `HAIR_CARE`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of wire strings.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every member in declaration order.
    fn all() -> &'static [Self];

    /// Canonical wire form.
    fn wire(&self) -> &'static str;

    /// Exact match against the canonical wire form.
    fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.wire() == value)
    }

    /// Human-readable member list used in rejection messages.
    fn members() -> String {
        Self::all()
            .iter()
            .map(|v| v.wire())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! define_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl Vocabulary for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn wire(&self) -> &'static str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let raw = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                match <$name as Vocabulary>::parse(raw) {
                    Some(v) => Ok(v),
                    None => Err(format!(
                        "unknown {} value '{}'",
                        stringify!($name),
                        raw
                    )
                    .into()),
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

define_vocabulary! {
    /// Account role.
    UserRole {
        Customer => "CUSTOMER",
        Admin => "ADMIN",
    }
}

define_vocabulary! {
    /// Style catalog category.
    StyleCategory {
        BoxBraids => "BOX_BRAIDS",
        Knotless => "KNOTLESS",
        Cornrows => "CORNROWS",
        Twists => "TWISTS",
        Locs => "LOCS",
        Fulani => "FULANI",
        Goddess => "GODDESS",
        Kids => "KIDS",
        Crochet => "CROCHET",
        Other => "OTHER",
    }
}

define_vocabulary! {
    /// How demanding a style is to install.
    Difficulty {
        Easy => "EASY",
        Medium => "MEDIUM",
        Hard => "HARD",
    }
}

define_vocabulary! {
    /// Shop product category.
    ProductCategory {
        HairCare => "HAIR_CARE",
        Styling => "STYLING",
        Accessories => "ACCESSORIES",
        Extensions => "EXTENSIONS",
        Tools => "TOOLS",
    }
}

define_vocabulary! {
    /// Appointment lifecycle status.
    AppointmentStatus {
        Scheduled => "SCHEDULED",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
        NoShow => "NO_SHOW",
    }
}

define_vocabulary! {
    /// Order fulfilment status.
    OrderStatus {
        Pending => "PENDING",
        Confirmed => "CONFIRMED",
        Processing => "PROCESSING",
        Shipped => "SHIPPED",
        Delivered => "DELIVERED",
        Cancelled => "CANCELLED",
    }
}

define_vocabulary! {
    /// Order payment status.
    PaymentStatus {
        Pending => "PENDING",
        Paid => "PAID",
        Failed => "FAILED",
        Refunded => "REFUNDED",
    }
}

define_vocabulary! {
    /// Kind of entity a review is about.
    ReviewTargetType {
        Stylist => "STYLIST",
        Product => "PRODUCT",
        Style => "STYLE",
    }
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }
}
