// Integration tests against a stubbed Etherpad API.

mod client;
mod diff;
mod helpers;
mod pads;
