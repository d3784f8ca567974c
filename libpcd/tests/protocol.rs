// Aggregator for protocol integration tests located in `tests/protocol/`.
// Cargo treats each top-level file in `tests/` as an integration test crate;
// the per-topic files are included as submodules.

#[path = "protocol/checksum_test.rs"]
mod checksum_test;

#[path = "protocol/codec_test.rs"]
mod codec_test;

#[path = "protocol/select_frame_test.rs"]
mod select_frame_test;
