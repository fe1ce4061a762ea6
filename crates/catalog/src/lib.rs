use std::fs;
use std::path::{Path, PathBuf};

use tags::{read_tags, TagInfo};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
    pub discs: Vec<String>,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(PathBuf, std::io::Error),
    Walk(walkdir::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(path, err) => {
                write!(f, "directory listing failed: {}: {}", path.display(), err)
            }
            CatalogError::Walk(err) => write!(f, "directory listing failed: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<walkdir::Error> for CatalogError {
    fn from(err: walkdir::Error) -> Self {
        CatalogError::Walk(err)
    }
}

// Cosmetic formatting hook; identity for now.
pub fn display_name(raw: &str) -> String {
    raw.to_string()
}

// The article check runs before trimming, so leading whitespace keeps it.
pub fn sort_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = lowered.strip_prefix("the ").unwrap_or(&lowered);
    stripped.trim().to_string()
}

// The first tagged file decides (artist, album), even when the tag's fields
// are blank. Untagged and unreadable entries are passed over; if nothing
// carries a tag, both strings come back empty.
pub fn probe_album(disc_dir: &Path) -> Result<(String, String), CatalogError> {
    for entry in sorted_children(disc_dir)? {
        match read_tags(entry.path()) {
            Ok(Some(info)) => return Ok(album_identity(info)),
            Ok(None) => {}
            Err(err) => {
                debug!("Skipping {:?}: {:?}", entry.path(), err);
            }
        }
    }
    Ok((String::new(), String::new()))
}

// The artist hint is last-write-wins across discs; a blank probe result
// does not clear an earlier hint.
pub fn scan_artist_discs(artist_dir: &Path) -> Result<(String, Vec<String>), CatalogError> {
    let mut artist_hint = String::new();
    let mut discs = Vec::new();
    for entry in sorted_children(artist_dir)? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let (artist, album) = probe_album(entry.path())?;
        artist_hint = merge_hint(artist_hint, artist);
        discs.push(name_or_dir(album, &entry.file_name().to_string_lossy()));
    }
    Ok((artist_hint, discs))
}

pub fn scan_library(root: &Path) -> Result<Vec<Artist>, CatalogError> {
    let mut artists = Vec::new();
    for entry in sorted_children(root)? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let (hint, mut discs) = scan_artist_discs(entry.path())?;
        discs.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        artists.push(Artist {
            name: name_or_dir(hint, &entry.file_name().to_string_lossy()),
            discs,
        });
    }
    artists.sort_by(|a, b| sort_key(&a.name).cmp(&sort_key(&b.name)));
    Ok(artists)
}

// One block per artist: name line, discs indented four spaces, blank line.
pub fn render(artists: &[Artist]) -> String {
    let mut out = String::new();
    for artist in artists {
        out.push_str(&artist.name);
        out.push('\n');
        for disc in &artist.discs {
            out.push_str("    ");
            out.push_str(disc);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn album_identity(info: TagInfo) -> (String, String) {
    let artist = info
        .artist
        .filter(|value| !value.trim().is_empty())
        .or(info.album_artist)
        .unwrap_or_default();
    let album = info.album.unwrap_or_default();
    (artist, album)
}

fn merge_hint(current: String, probed: String) -> String {
    if probed.trim().is_empty() {
        current
    } else {
        probed
    }
}

fn name_or_dir(name: String, dir_name: &str) -> String {
    if name.trim().is_empty() {
        display_name(dir_name)
    } else {
        name
    }
}

fn sorted_children(dir: &Path) -> Result<Vec<DirEntry>, CatalogError> {
    // WalkDir yields neither entries nor an error when the root is missing or
    // not a directory; read_dir catches both up front.
    fs::read_dir(dir).map_err(|err| CatalogError::Io(dir.to_path_buf(), err))?;

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        entries.push(entry?);
    }
    Ok(entries)
}
