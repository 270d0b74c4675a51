mod diff;
mod error;
