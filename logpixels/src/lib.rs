//! Query the pixel density of the primary display.
//!
//! The main entry point is [`query_horizontal_dpi()`], which asks the
//! operating system for the horizontal density of the desktop device context.
//!
//! # Process DPI awareness
//! Unless the process has declared itself DPI aware, Windows virtualizes the
//! density and will report 96 regardless of the display scaling settings.
//! Hosting applications must call [`declare_dpi_aware()`] once at startup,
//! before the first query. The probe never does this on its own.
//!
//! [`query_horizontal_dpi()`]: query_horizontal_dpi
//! [`declare_dpi_aware()`]: declare_dpi_aware
use std::convert::TryFrom;
use std::fmt;
use std::num::NonZeroU32;

/// Errors reported by density queries.
mod error;
pub use error::Error;

/// Display surfaces provided by the host operating system.
mod surface;
pub use surface::{declare_dpi_aware, DeviceContext, PrimaryDisplay};

/// Display doubles for exercising the query logic without a real display.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

/// A source of display surfaces.
pub trait Display {
	/// The type of the surface handed out by this display.
	///
	/// Surfaces are scoped: dropping one must return it to the display.
	type Surface: Surface;

	/// Try to acquire a surface from this display.
	fn acquire(&self) -> Result<Self::Surface, Error>;
}

/// A drawing surface whose device capabilities can be queried.
pub trait Surface {
	/// The raw number of pixels per logical inch along the horizontal axis.
	fn horizontal_density(&self) -> i32;
}

/// A positive density reading, in pixels per inch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Dpi(NonZeroU32);
impl Dpi {
	/// The density the system treats as 100% scaling.
	pub const BASE: u32 = 96;

	/// Create a reading from a raw value reported by the system, returning
	/// `None` if the value is not positive.
	pub fn new(value: i32) -> Option<Self> {
		u32::try_from(value)
			.ok()
			.and_then(NonZeroU32::new)
			.map(Self)
	}

	/// The number of pixels per inch.
	pub fn get(&self) -> u32 {
		self.0.get()
	}

	/// The number of pixels per inch, as the signed integer the system
	/// originally reported it as.
	pub fn as_i32(&self) -> i32 {
		/* Only ever built from a positive i32 in new(). */
		self.get() as i32
	}

	/// The scaling factor this density corresponds to, where `1.0` is 100%.
	pub fn scale_factor(&self) -> f32 {
		self.get() as f32 / Self::BASE as f32
	}
}
impl fmt::Display for Dpi {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.get())
	}
}

/// Query the horizontal density of the primary display.
///
/// The vertical density is assumed to be the same and is never looked at.
pub fn query_horizontal_dpi() -> Result<Dpi, Error> {
	query_horizontal_dpi_from(&PrimaryDisplay)
}

/// Query the horizontal density of a surface of the given display.
///
/// The surface is acquired and released within this call. Failures are
/// reported straight away and never retried.
pub fn query_horizontal_dpi_from<D: Display + ?Sized>(display: &D)
	-> Result<Dpi, Error> {

	let value = surface::read_horizontal(display)?;
	match Dpi::new(value) {
		Some(dpi) => {
			log::debug!("horizontal density is {} ({}x)", dpi, dpi.scale_factor());
			Ok(dpi)
		},
		None => {
			log::warn!("display surface reported a density of {}", value);
			Err(Error::InvalidReading { value })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::FakeDisplay;

	#[test]
	fn reading_is_taken_from_the_surface() {
		let display = FakeDisplay::reporting(144);
		let dpi = query_horizontal_dpi_from(&display).unwrap();

		assert_eq!(dpi.get(), 144);
		assert_eq!(display.acquisitions(), 1);
		assert_eq!(display.releases(), 1);
	}

	#[test]
	fn denied_acquisition_is_an_error() {
		let display = FakeDisplay::denying(5);
		let result = query_horizontal_dpi_from(&display);

		assert_eq!(result, Err(Error::AcquisitionFailure { code: 5 }));
		assert_eq!(display.acquisitions(), 1);
		assert_eq!(display.releases(), 0);
	}

	#[test]
	fn non_positive_readings_still_release_the_surface() {
		for value in &[0, -1, i32::MIN] {
			let display = FakeDisplay::reporting(*value);
			let result = query_horizontal_dpi_from(&display);

			assert_eq!(result, Err(Error::InvalidReading { value: *value }));
			assert_eq!(display.releases(), 1);
		}
	}

	#[test]
	fn repeated_queries_are_stable() {
		let display = FakeDisplay::reporting(120);
		let first = query_horizontal_dpi_from(&display).unwrap();
		for _ in 0..16 {
			assert_eq!(query_horizontal_dpi_from(&display).unwrap(), first);
		}

		assert_eq!(display.acquisitions(), 17);
		assert_eq!(display.releases(), 17);
	}

	#[test]
	fn concurrent_queries_hold_independent_surfaces() {
		let display = FakeDisplay::reporting(96);
		let shared = &display;
		std::thread::scope(|scope| {
			let workers = (0..8)
				.map(|_| scope.spawn(move || {
					(0..64)
						.map(|_| query_horizontal_dpi_from(shared))
						.collect::<Vec<_>>()
				}))
				.collect::<Vec<_>>();

			for worker in workers {
				for result in worker.join().unwrap() {
					assert_eq!(result.unwrap().get(), 96);
				}
			}
		});

		assert_eq!(display.acquisitions(), 8 * 64);
		assert_eq!(display.releases(), 8 * 64);
	}

	#[test]
	fn scale_factor_follows_base_density() {
		assert_eq!(Dpi::new(96).unwrap().scale_factor(), 1.0);
		assert_eq!(Dpi::new(120).unwrap().scale_factor(), 1.25);
		assert_eq!(Dpi::new(144).unwrap().scale_factor(), 1.5);
		assert_eq!(Dpi::new(192).unwrap().scale_factor(), 2.0);
	}

	#[test]
	fn dpi_rejects_non_positive_values() {
		assert_eq!(Dpi::new(0), None);
		assert_eq!(Dpi::new(-96), None);
		assert_eq!(Dpi::new(1).map(|dpi| dpi.get()), Some(1));
	}

	#[test]
	fn dpi_keeps_the_reported_integer() {
		assert_eq!(Dpi::new(i32::MAX).unwrap().as_i32(), i32::MAX);
		assert_eq!(Dpi::new(144).unwrap().as_i32(), 144);
	}

	#[test]
	fn dpi_displays_as_bare_integer() {
		assert_eq!(Dpi::new(144).unwrap().to_string(), "144");
	}

	#[test]
	fn errors_describe_their_cause() {
		let denied = Error::AcquisitionFailure { code: 0x57 };
		assert_eq!(
			denied.to_string(),
			"the display surface could not be acquired (os error 0x00000057)");

		let invalid = Error::InvalidReading { value: -3 };
		assert_eq!(
			invalid.to_string(),
			"the display surface reported an invalid density of -3");
	}

	#[cfg(not(windows))]
	#[test]
	fn primary_display_is_unavailable_off_windows() {
		assert_eq!(
			query_horizontal_dpi(),
			Err(Error::AcquisitionFailure { code: 0 }));
		assert!(!declare_dpi_aware());
	}

	#[cfg(windows)]
	#[test]
	fn primary_display_reports_a_stable_positive_density() {
		let _ = declare_dpi_aware();

		/* Machines running without an interactive desktop have nothing to
		 * hand out, which is a legitimate outcome of the query. */
		let first = match query_horizontal_dpi() {
			Ok(dpi) => dpi,
			Err(Error::AcquisitionFailure { .. }) => return,
			Err(what) => panic!("unexpected error: {}", what),
		};

		assert!(first.get() > 0);
		for _ in 0..8 {
			assert_eq!(query_horizontal_dpi().unwrap(), first);
		}

		std::thread::scope(|scope| {
			let workers = (0..8)
				.map(|_| scope.spawn(|| {
					(0..32)
						.map(|_| query_horizontal_dpi())
						.collect::<Vec<_>>()
				}))
				.collect::<Vec<_>>();

			for worker in workers {
				for result in worker.join().unwrap() {
					assert_eq!(result.unwrap(), first);
				}
			}
		});
	}
}
