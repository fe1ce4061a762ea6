use std::path::Path;

use lofty::error::LoftyError;
use lofty::prelude::{ItemKey, TaggedFileExt};

#[derive(Debug, Default, Clone)]
pub struct TagInfo {
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
}

#[derive(Debug)]
pub enum TagError {
    Io(std::io::Error),
    Lofty(LoftyError),
}

impl From<std::io::Error> for TagError {
    fn from(err: std::io::Error) -> Self {
        TagError::Io(err)
    }
}

impl From<LoftyError> for TagError {
    fn from(err: LoftyError) -> Self {
        TagError::Lofty(err)
    }
}

// A parseable file without any embedded tag yields Ok(None); a file that
// cannot be opened or parsed yields an error. A present tag with missing
// fields yields Some with None fields.
pub fn read_tags(path: &Path) -> Result<Option<TagInfo>, TagError> {
    let tagged_file = lofty::read_from_path(path)?;
    let tag = match tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        Some(tag) => tag,
        None => return Ok(None),
    };

    Ok(Some(TagInfo {
        artist: tag.get_string(&ItemKey::TrackArtist).map(|v| v.to_string()),
        album_artist: tag.get_string(&ItemKey::AlbumArtist).map(|v| v.to_string()),
        album: tag.get_string(&ItemKey::AlbumTitle).map(|v| v.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use lofty::config::WriteOptions;
    use lofty::prelude::{Accessor, TagExt};
    use lofty::tag::{Tag, TagType};
    use tempfile::tempdir;

    use super::*;

    fn write_minimal_wav(path: &Path) {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&40u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&44100u32.to_le_bytes());
        bytes.extend_from_slice(&88200u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn untagged_audio_reads_as_no_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.wav");
        write_minimal_wav(&path);

        assert!(read_tags(&path).unwrap().is_none());
    }

    #[test]
    fn tagged_audio_reads_identity_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tagged.wav");
        write_minimal_wav(&path);

        let mut tag = Tag::new(TagType::Id3v2);
        tag.set_artist("Artist A".to_string());
        tag.set_album("Album X".to_string());
        tag.insert_text(ItemKey::AlbumArtist, "Various".to_string());
        tag.save_to_path(&path, WriteOptions::default()).unwrap();

        let info = read_tags(&path).unwrap().unwrap();
        assert_eq!(info.artist.as_deref(), Some("Artist A"));
        assert_eq!(info.album.as_deref(), Some("Album X"));
        assert_eq!(info.album_artist.as_deref(), Some("Various"));
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        fs::write(&path, b"not really audio").unwrap();

        assert!(read_tags(&path).is_err());
    }
}
