//! Console keyboard mode ioctls.
//!
//! These are the only `unsafe` calls in the crate. Each wrapper takes a
//! borrowed descriptor so the fd is guaranteed open for the duration of
//! the call, and passes either a plain integer or a pointer to a local.

#![allow(unsafe_code)]

use nix::errno::Errno;
use std::os::fd::{AsRawFd, BorrowedFd};

use crate::model::KeyboardMode;

#[cfg(target_os = "linux")]
mod sys {
    const KDGKBMODE: u32 = 0x4B44;
    const KDSKBMODE: u32 = 0x4B45;

    nix::ioctl_read_bad!(
        /// Query the console keyboard mode.
        kd_get_kb_mode,
        KDGKBMODE,
        std::ffi::c_int
    );
    nix::ioctl_write_int_bad!(
        /// Set the console keyboard mode.
        kd_set_kb_mode,
        KDSKBMODE
    );
}

#[cfg(target_os = "freebsd")]
mod sys {
    nix::ioctl_read!(
        /// Query the console keyboard mode.
        kd_get_kb_mode,
        b'K',
        6,
        std::ffi::c_int
    );
    nix::ioctl_write_int_bad!(
        /// Set the console keyboard mode.
        kd_set_kb_mode,
        nix::request_code_none!(b'K', 7)
    );
}

/// Read the current keyboard mode of the console behind `fd`.
#[cfg(any(target_os = "linux", target_os = "freebsd"))]
pub(crate) fn get_keyboard_mode(fd: BorrowedFd<'_>) -> nix::Result<KeyboardMode> {
    let mut raw: std::ffi::c_int = 0;
    // SAFETY: fd is borrowed and open; `raw` outlives the call.
    unsafe { sys::kd_get_kb_mode(fd.as_raw_fd(), &mut raw) }?;
    KeyboardMode::from_raw(raw).ok_or(Errno::EINVAL)
}

/// Switch the console behind `fd` to `mode`.
#[cfg(any(target_os = "linux", target_os = "freebsd"))]
pub(crate) fn set_keyboard_mode(fd: BorrowedFd<'_>, mode: KeyboardMode) -> nix::Result<()> {
    let raw = mode.to_raw().ok_or(Errno::EINVAL)?;
    // SAFETY: fd is borrowed and open; the argument is passed by value.
    unsafe { sys::kd_set_kb_mode(fd.as_raw_fd(), raw) }?;
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "freebsd")))]
pub(crate) fn get_keyboard_mode(fd: BorrowedFd<'_>) -> nix::Result<KeyboardMode> {
    let _ = fd.as_raw_fd();
    Err(Errno::ENOTTY)
}

#[cfg(not(any(target_os = "linux", target_os = "freebsd")))]
pub(crate) fn set_keyboard_mode(fd: BorrowedFd<'_>, mode: KeyboardMode) -> nix::Result<()> {
    let _ = (fd.as_raw_fd(), mode);
    Err(Errno::ENOTTY)
}
