//! Terminal and keyboard mode switching.
//!
//! [`ModeController`] owns the console device for the lifetime of a
//! session and turns device failures into the matching
//! [`ScanError`] variant. [`derive_raw_config`] builds the raw
//! line-discipline attributes from the captured original.

mod raw;

pub use raw::{
    derive_raw_config, RawModeAttributes, RAW_CLEARED_INPUT_FLAGS, RAW_CLEARED_LOCAL_FLAGS,
};

use tracing::debug;

use crate::device::ConsoleDevice;
use crate::error::{ScanError, ScanResult};
use crate::model::KeyboardMode;

/// Switches a console device between its original and raw states.
pub struct ModeController<D: ConsoleDevice> {
    device: D,
    symbolic_mode: Option<KeyboardMode>,
    scancode_active: bool,
}

impl<D: ConsoleDevice> ModeController<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            symbolic_mode: None,
            scancode_active: false,
        }
    }

    /// Snapshot the current line-discipline attributes.
    pub fn capture_original(&mut self) -> ScanResult<D::Attributes> {
        self.device.attributes().map_err(ScanError::DeviceQuery)
    }

    /// Apply attributes, flushing unread input and unwritten output first.
    pub fn apply_config(&mut self, attributes: &D::Attributes) -> ScanResult<()> {
        self.device
            .set_attributes(attributes)
            .map_err(ScanError::DeviceConfig)
    }

    /// Derive raw attributes from `original` and apply them.
    pub fn enter_raw_mode(&mut self, original: &D::Attributes) -> ScanResult<()> {
        let raw = derive_raw_config(original);
        self.apply_config(&raw)?;
        debug!("terminal attributes switched to raw mode");
        Ok(())
    }

    /// Reapply a previously captured configuration.
    pub fn restore_original(&mut self, original: &D::Attributes) -> ScanResult<()> {
        self.device
            .set_attributes(original)
            .map_err(ScanError::DeviceRestore)
    }

    /// Remember the current symbolic mode for
    /// [`enter_symbolic_mode`](Self::enter_symbolic_mode).
    ///
    /// Falls back to `K_XLATE` when the mode cannot be queried or is not
    /// symbolic.
    pub fn capture_keyboard_mode(&mut self) -> KeyboardMode {
        let mode = match self.device.keyboard_mode() {
            Ok(mode) if mode.is_symbolic() => mode,
            Ok(mode) => {
                debug!(%mode, "keyboard was not in a symbolic mode");
                KeyboardMode::Xlate
            }
            Err(errno) => {
                debug!(%errno, "could not query keyboard mode");
                KeyboardMode::Xlate
            }
        };
        self.symbolic_mode = Some(mode);
        mode
    }

    /// Switch the keyboard to raw scancode reporting.
    ///
    /// Captures the symbolic mode first if that has not happened yet.
    pub fn enter_scancode_mode(&mut self) -> ScanResult<()> {
        let previous = match self.symbolic_mode {
            Some(mode) => mode,
            None => self.capture_keyboard_mode(),
        };

        let mode = KeyboardMode::SCANCODE;
        self.device
            .set_keyboard_mode(mode)
            .map_err(|source| ScanError::UnsupportedDevice { mode, source })?;
        self.scancode_active = true;
        debug!(%mode, %previous, "keyboard switched to scancode mode");
        Ok(())
    }

    /// Restore symbolic key translation.
    pub fn enter_symbolic_mode(&mut self) -> ScanResult<()> {
        let mode = self.symbolic_mode();
        self.device
            .set_keyboard_mode(mode)
            .map_err(|source| ScanError::KeyboardRestore { mode, source })?;
        self.scancode_active = false;
        Ok(())
    }

    /// Whether the keyboard is currently switched to scancode mode.
    pub fn scancode_active(&self) -> bool {
        self.scancode_active
    }

    /// Mode [`enter_symbolic_mode`](Self::enter_symbolic_mode) will restore.
    pub fn symbolic_mode(&self) -> KeyboardMode {
        self.symbolic_mode.unwrap_or(KeyboardMode::Xlate)
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
