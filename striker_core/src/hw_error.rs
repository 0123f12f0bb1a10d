//! Maps `Box<dyn Error>` from trait boundaries to typed `StrikerError`.
//!
//! The traits in `striker_traits` use `Box<dyn Error + Send + Sync>` for
//! maximum flexibility; this module converts those to our typed error enum,
//! with an optional feature-gated path for `striker_hardware::HwError`
//! downcasting.

use crate::error::StrikerError;

/// Map a trait-boundary error to a typed `StrikerError`.
///
/// Attempts to downcast known hardware error types first, then falls back
/// to a string-based wrapper.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> StrikerError {
    // Feature-gated: try to downcast to HwError for precise mapping
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<striker_hardware::error::HwError>() {
            return match hw {
                striker_hardware::error::HwError::QueueEmpty(device) => {
                    StrikerError::State(format!("read from empty {device} queue"))
                }
                other => StrikerError::HardwareFault(other.to_string()),
            };
        }
    }

    StrikerError::Hardware(e.to_string())
}
