use crate::cursor::Cursor;
use crate::error::FormatError;

/// Both recognized header tags are this many bytes, right-padded with spaces.
pub const HEADER_LEN: usize = 43;

const HEADER_V3: &[u8; HEADER_LEN] = b"reMarkable .lines file, version=3          ";
const HEADER_V5: &[u8; HEADER_LEN] = b"reMarkable .lines file, version=5          ";

/// Stroke file format version, selected by the header tag.
///
/// Version 5 stroke headers carry one extra float field over version 3;
/// segment records are identical in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V3,
    V5,
}

impl Version {
    /// Match the fixed-length tag at the cursor and validate the layer count.
    ///
    /// Returns the version and the declared number of layers. Any tag other
    /// than the two recognized values is [`FormatError::UnknownVersion`];
    /// a layer count of zero is [`FormatError::NoLayers`].
    pub fn read_header(cursor: &mut Cursor<'_>) -> Result<(Version, u32), FormatError> {
        let tag = cursor.read_bytes(HEADER_LEN)?;
        let version = if tag == HEADER_V3 {
            Version::V3
        } else if tag == HEADER_V5 {
            Version::V5
        } else {
            return Err(FormatError::UnknownVersion);
        };

        let nlayers = cursor.read_u32()?;
        if nlayers < 1 {
            return Err(FormatError::NoLayers);
        }
        Ok((version, nlayers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_layer_count(tag: &[u8], nlayers: u32) -> Vec<u8> {
        let mut buf = tag.to_vec();
        buf.extend_from_slice(&nlayers.to_le_bytes());
        buf
    }

    #[test]
    fn accepts_both_versions() {
        let buf = with_layer_count(HEADER_V3, 2);
        let mut cur = Cursor::new(&buf);
        assert_eq!(Version::read_header(&mut cur).unwrap(), (Version::V3, 2));

        let buf = with_layer_count(HEADER_V5, 1);
        let mut cur = Cursor::new(&buf);
        assert_eq!(Version::read_header(&mut cur).unwrap(), (Version::V5, 1));
    }

    #[test]
    fn any_other_tag_is_unknown_version() {
        let mut tag = *HEADER_V5;
        tag[HEADER_LEN - 11] = b'7';
        let buf = with_layer_count(&tag, 1);
        let mut cur = Cursor::new(&buf);
        assert_eq!(
            Version::read_header(&mut cur).unwrap_err(),
            FormatError::UnknownVersion
        );
    }

    #[test]
    fn zero_layers_is_rejected() {
        let buf = with_layer_count(HEADER_V3, 0);
        let mut cur = Cursor::new(&buf);
        assert_eq!(
            Version::read_header(&mut cur).unwrap_err(),
            FormatError::NoLayers
        );
    }

    #[test]
    fn header_shorter_than_the_tag_is_truncated() {
        let mut cur = Cursor::new(&HEADER_V5[..20]);
        assert!(matches!(
            Version::read_header(&mut cur).unwrap_err(),
            FormatError::Truncated { .. }
        ));
    }
}
