//! Property tests for the data URI codec

use image_transclusion::transclusion::codec::{
    decode_data_uri, encode_data_uri, extension_for_mime, mime_for_extension,
};
use proptest::prelude::*;

const REGISTERED: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
    "image/avif",
];

proptest! {
    #[test]
    fn prop_data_uri_round_trip(
        mime_index in 0..REGISTERED.len(),
        bytes in proptest::collection::vec(any::<u8>(), 0..2048),
    ) {
        let mime_type = REGISTERED[mime_index];
        let decoded = decode_data_uri(&encode_data_uri(mime_type, &bytes)).unwrap();

        prop_assert_eq!(decoded.mime_type, mime_type);
        prop_assert_eq!(decoded.data, bytes);
    }

    #[test]
    fn prop_canonical_extension_maps_back(mime_index in 0..REGISTERED.len()) {
        let mime_type = REGISTERED[mime_index];
        let extension = extension_for_mime(mime_type).unwrap();

        prop_assert_eq!(mime_for_extension(extension), mime_type);
    }

    #[test]
    fn prop_decode_never_panics(input in ".{0,256}") {
        let _ = decode_data_uri(&input);
    }
}
