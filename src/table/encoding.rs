use encoding_rs::Encoding;
use log::warn;
use std::borrow::Cow;

/// Encoding of the IGN municipality export.
///
/// WHATWG maps the `latin1` label to windows-1252, a superset of ISO-8859-1
/// over the printable range.
pub const IGN_SOURCE_ENCODING: &Encoding = encoding_rs::WINDOWS_1252;

/// Decodes raw bytes into UTF-8 text.
///
/// A leading BOM, if any, takes precedence over `encoding`.
pub fn decode_source<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "Malformed {} sequences replaced while decoding source table",
            used.name()
        );
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latin1_enye() {
        // "Cariño" in ISO-8859-1
        let bytes = b"Cari\xf1o";
        assert_eq!(decode_source(bytes, IGN_SOURCE_ENCODING), "Cariño");
    }

    #[test]
    fn test_decode_latin1_accents() {
        let bytes = b"C\xe1diz;A Coru\xf1a;\xc1lava";
        assert_eq!(
            decode_source(bytes, IGN_SOURCE_ENCODING),
            "Cádiz;A Coruña;Álava"
        );
    }

    #[test]
    fn test_decode_utf8_bom_wins() {
        let bytes = "\u{feff}Cariño".as_bytes();
        assert_eq!(decode_source(bytes, IGN_SOURCE_ENCODING), "Cariño");
    }
}
