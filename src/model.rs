//! Core data model for the hostel desk.
//!
//! One strongly typed record per entity: bookings, rooms, guests, and
//! maintenance requests. Records are populated once at the store boundary;
//! nothing downstream deals with loosely shaped data.

/// Declares a closed set of named values with a stable kebab-case spelling.
///
/// The spelling is shared by serde, the `SQLite` columns, and CLI parsing,
/// so a value always reads and writes the same way everywhere. Each set
/// marks its default variant with `#[default]`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            /// The canonical spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err($crate::model::UnknownVariant {
                        kind: $label,
                        value: s.to_string(),
                        expected: &[$($text),+],
                    }),
                }
            }
        }
    };
}

mod amount;
mod booking;
mod guest;
mod maintenance;
mod room;

pub use amount::{Amount, ParseAmountError};
pub use booking::{Booking, BookingSource, BookingStatus, InvalidStay, Stay};
pub use guest::{Guest, GuestStatus};
pub use maintenance::{Category, MaintenanceRequest, MaintenanceStatus, Priority};
pub use room::{BathroomType, Pricing, Room, RoomStatus, RoomType};

/// A string that names none of an enum's values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {})", .expected.join(", "))]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}
