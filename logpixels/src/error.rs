/// Enumeration of the reasons a density query may fail.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
	/// The operating system declined to hand out a display surface handle.
	///
	/// This is the case when there is no display subsystem available to the
	/// process, such as in a service session or on a platform without one.
	#[error("the display surface could not be acquired (os error 0x{code:08x})")]
	AcquisitionFailure {
		/// The last error code reported by the system, or zero if the system
		/// gave no reason.
		code: u32,
	},
	/// The display surface reported a density that is not a positive number.
	#[error("the display surface reported an invalid density of {value}")]
	InvalidReading {
		/// The raw value reported by the surface.
		value: i32,
	},
}
