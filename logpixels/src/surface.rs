use crate::{Display, Error, Surface};

/// The primary display of the host, as brokered by the operating system.
///
/// Acquiring a surface from this display hands out a device context for the
/// whole desktop, which is released again when the surface is dropped.
#[derive(Debug, Default, Copy, Clone)]
pub struct PrimaryDisplay;

#[cfg(windows)]
mod platform {
	use super::PrimaryDisplay;
	use crate::{Display, Error, Surface};
	use winapi::shared::windef::HDC;
	use winapi::um::errhandlingapi::GetLastError;
	use winapi::um::wingdi as gdi;
	use winapi::um::winuser as user;

	/// A scoped handle to the device context of the desktop window.
	///
	/// The handle is only valid between the `GetDC()` call that produced it
	/// and the matching `ReleaseDC()` call in our drop implementation, so it
	/// never leaves the thread that acquired it.
	#[derive(Debug)]
	pub struct DeviceContext {
		hdc: HDC,
	}
	impl Surface for DeviceContext {
		fn horizontal_density(&self) -> i32 {
			unsafe {
				/* The handle is valid for as long as we are alive, and this
				 * capability query has no failure mode of its own. */
				gdi::GetDeviceCaps(self.hdc, gdi::LOGPIXELSX)
			}
		}
	}
	impl Drop for DeviceContext {
		fn drop(&mut self) {
			unsafe {
				let released = user::ReleaseDC(user::HWND_DESKTOP, self.hdc);
				if released == 0 {
					log::warn!("ReleaseDC({:p}, {:p}) failed",
						user::HWND_DESKTOP,
						self.hdc);
				}
			}
		}
	}

	impl Display for PrimaryDisplay {
		type Surface = DeviceContext;
		fn acquire(&self) -> Result<Self::Surface, Error> {
			unsafe {
				let hdc = user::GetDC(user::HWND_DESKTOP);
				if hdc.is_null() {
					let code = GetLastError();
					log::warn!("GetDC({:p}) failed: 0x{:08x}",
						user::HWND_DESKTOP,
						code);

					return Err(Error::AcquisitionFailure { code })
				}

				Ok(DeviceContext { hdc })
			}
		}
	}

	/// Declare the whole process as being aware of the system DPI.
	pub fn declare_dpi_aware() -> bool {
		/* SetProcessDpiAwareness() would be the Windows 8.1 way of doing this,
		 * but the Vista-era call is available everywhere we care about. */
		let accepted = unsafe { user::SetProcessDPIAware() } != 0;
		if !accepted {
			log::warn!("SetProcessDPIAware() failed: 0x{:08x}",
				unsafe { GetLastError() });
		}

		accepted
	}
}

#[cfg(not(windows))]
mod platform {
	use super::PrimaryDisplay;
	use crate::{Display, Error, Surface};

	/// Surface type for platforms with no desktop device context. It cannot
	/// be constructed.
	#[derive(Debug)]
	pub enum DeviceContext {}
	impl Surface for DeviceContext {
		fn horizontal_density(&self) -> i32 {
			match *self {}
		}
	}

	impl Display for PrimaryDisplay {
		type Surface = DeviceContext;
		fn acquire(&self) -> Result<Self::Surface, Error> {
			log::debug!("no desktop device context on this platform");
			Err(Error::AcquisitionFailure { code: 0 })
		}
	}

	pub fn declare_dpi_aware() -> bool {
		false
	}
}

pub use platform::{declare_dpi_aware, DeviceContext};

/// Read the horizontal density from a freshly acquired surface of the given
/// display.
///
/// The surface is dropped, and therefore released, before this function
/// returns, whether or not the reading turns out to be valid.
pub(crate) fn read_horizontal<D: Display + ?Sized>(display: &D)
	-> Result<i32, Error> {

	let surface = display.acquire()?;
	let value = surface.horizontal_density();
	drop(surface);

	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeDisplay;

	#[test]
	fn raw_reading_is_returned_and_surface_released() {
		let display = FakeDisplay::reporting(-7);
		assert_eq!(read_horizontal(&display), Ok(-7));
		assert_eq!(display.acquisitions(), 1);
		assert_eq!(display.releases(), 1);
	}

	#[test]
	fn denied_acquisition_is_passed_through() {
		let display = FakeDisplay::denying(0x5);
		assert_eq!(
			read_horizontal(&display),
			Err(Error::AcquisitionFailure { code: 0x5 }));
		assert_eq!(display.releases(), 0);
	}
}
