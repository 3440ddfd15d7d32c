use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InputError {
	#[error("Malformed entry {0:?}, expected NUMBER:COUNTRY or NUMBER:COUNTRY:CALLBACK")]
	MalformedEntry(String),
	#[error("No numbers to check. Pass entries on the command line or use --file.")]
	EmptyBatch,
	#[error("Delay must be a finite, non-negative number of seconds, got {0}")]
	InvalidDelay(f64),
}
