use crate::{Display, Error, Surface};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A display that hands out surfaces reporting a fixed density, or refuses
/// to hand out any surface at all.
///
/// Every acquisition and release is counted, so that tests can check that
/// surfaces are always given back.
#[derive(Debug)]
pub struct FakeDisplay {
	outcome: Result<i32, Error>,
	acquisitions: AtomicUsize,
	releases: Arc<AtomicUsize>,
}
impl FakeDisplay {
	/// A display whose surfaces report the given raw density.
	pub fn reporting(value: i32) -> Self {
		Self::new(Ok(value))
	}

	/// A display that denies every acquisition with the given system code.
	pub fn denying(code: u32) -> Self {
		Self::new(Err(Error::AcquisitionFailure { code }))
	}

	fn new(outcome: Result<i32, Error>) -> Self {
		Self {
			outcome,
			acquisitions: AtomicUsize::new(0),
			releases: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// How many surfaces have been requested from this display.
	pub fn acquisitions(&self) -> usize {
		self.acquisitions.load(Ordering::SeqCst)
	}

	/// How many surfaces have been given back to this display.
	pub fn releases(&self) -> usize {
		self.releases.load(Ordering::SeqCst)
	}
}
impl Display for FakeDisplay {
	type Surface = FakeSurface;
	fn acquire(&self) -> Result<Self::Surface, Error> {
		self.acquisitions.fetch_add(1, Ordering::SeqCst);
		let value = self.outcome?;

		Ok(FakeSurface {
			value,
			releases: Arc::clone(&self.releases),
		})
	}
}

/// A surface handed out by a [`FakeDisplay`].
#[derive(Debug)]
pub struct FakeSurface {
	value: i32,
	releases: Arc<AtomicUsize>,
}
impl Surface for FakeSurface {
	fn horizontal_density(&self) -> i32 {
		self.value
	}
}
impl Drop for FakeSurface {
	fn drop(&mut self) {
		self.releases.fetch_add(1, Ordering::SeqCst);
	}
}
