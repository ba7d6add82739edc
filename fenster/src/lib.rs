//! Native methods backing the `processing.core.platform.Fenster` class.
//!
//! The names and shapes of the exported functions are fixed by the host
//! runtime, which looks them up by symbol when the class calls its `native`
//! methods. All of the actual work is done by the [`logpixels`] crate; this
//! crate only converts its results into something that can cross the
//! boundary.
//!
//! Hosts should get the process to declare itself DPI aware before calling
//! into this library, otherwise the reported density will not reflect the
//! display scaling settings. See [`logpixels::declare_dpi_aware()`].
#![allow(non_camel_case_types)]

use logpixels::{Display, PrimaryDisplay};
use std::os::raw::c_void;

/// The 32-bit integer type of the host runtime.
pub type jint = i32;

/// A reference to the object a native method was invoked on.
pub type jobject = *mut c_void;

/// The opaque interface pointer handed to every native method.
///
/// We never call back into the host, so this is only here to give the
/// exported functions their expected shape.
#[repr(C)]
pub struct JNIEnv {
	_private: [u8; 0],
}

/// Query the horizontal density of the primary display, with `0` standing in
/// for any failure.
pub fn log_pixels() -> jint {
	log_pixels_from(&PrimaryDisplay)
}

/// Query the horizontal density of the given display, with `0` standing in
/// for any failure.
///
/// The host calling convention has no way of carrying our error type across,
/// and zero is never a valid density.
pub fn log_pixels_from<D: Display + ?Sized>(display: &D) -> jint {
	match logpixels::query_horizontal_dpi_from(display) {
		Ok(dpi) => dpi.as_i32(),
		Err(what) => {
			log::error!("could not query the display density: {}", what);
			0
		}
	}
}

/// `private native void sayHello()`
#[no_mangle]
pub extern "system" fn Java_processing_core_platform_Fenster_sayHello(
	_env: *mut JNIEnv,
	_this: jobject) {}

/// `private native int getLogPixels()`
#[no_mangle]
pub extern "system" fn Java_processing_core_platform_Fenster_getLogPixels(
	_env: *mut JNIEnv,
	_this: jobject) -> jint {

	log_pixels()
}
