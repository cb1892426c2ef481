//! Visual treatment of order and payment statuses.

use crate::types::{OrderStatus, PaymentStatus};

/// Icons in the status sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    Clock,
    CheckCircle,
    Package,
    XCircle,
}

impl StatusIcon {
    /// Symbol id in `icons.svg`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::CheckCircle => "check-circle",
            Self::Package => "package",
            Self::XCircle => "x-circle",
        }
    }
}

/// Icon and CSS classes for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub icon: StatusIcon,
    /// Colour of the icon.
    pub icon_class: &'static str,
    /// Background and text colour of the badge.
    pub badge_class: &'static str,
    /// Text colour for inline labels.
    pub text_class: &'static str,
}

impl StatusStyle {
    /// Neutral style for statuses without a dedicated treatment.
    pub const NEUTRAL: Self = Self::new(StatusIcon::Clock, Tone::Gray);

    const fn new(icon: StatusIcon, tone: Tone) -> Self {
        let (icon_class, badge_class) = match tone {
            Tone::Yellow => ("text-yellow-500", "bg-yellow-100 text-yellow-800"),
            Tone::Blue => ("text-blue-500", "bg-blue-100 text-blue-800"),
            Tone::Orange => ("text-orange-500", "bg-orange-100 text-orange-800"),
            Tone::Green => ("text-green-500", "bg-green-100 text-green-800"),
            Tone::Red => ("text-red-500", "bg-red-100 text-red-800"),
            Tone::Gray => ("text-gray-500", "bg-gray-100 text-gray-800"),
        };
        let text_class = match tone {
            Tone::Yellow => "text-yellow-600",
            Tone::Blue => "text-blue-600",
            Tone::Orange => "text-orange-600",
            Tone::Green => "text-green-600",
            Tone::Red => "text-red-600",
            Tone::Gray => "text-gray-600",
        };
        Self {
            icon,
            icon_class,
            badge_class,
            text_class,
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Yellow,
    Blue,
    Orange,
    Green,
    Red,
    Gray,
}

impl OrderStatus {
    #[must_use]
    pub const fn style(&self) -> StatusStyle {
        match self {
            Self::Pending => StatusStyle::new(StatusIcon::Clock, Tone::Yellow),
            Self::Confirmed => StatusStyle::new(StatusIcon::CheckCircle, Tone::Blue),
            Self::Preparing => StatusStyle::new(StatusIcon::Package, Tone::Orange),
            Self::Delivered => StatusStyle::new(StatusIcon::CheckCircle, Tone::Green),
            Self::Cancelled => StatusStyle::new(StatusIcon::XCircle, Tone::Red),
            Self::Other(_) => StatusStyle::NEUTRAL,
        }
    }
}

impl PaymentStatus {
    #[must_use]
    pub const fn style(&self) -> StatusStyle {
        match self {
            Self::Completed => StatusStyle::new(StatusIcon::CheckCircle, Tone::Green),
            Self::Failed => StatusStyle::new(StatusIcon::XCircle, Tone::Red),
            Self::Pending => StatusStyle::new(StatusIcon::Clock, Tone::Yellow),
            Self::Other(_) => StatusStyle::NEUTRAL,
        }
    }
}

/// Uppercase the first character, leaving the rest as is.
#[must_use]
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
