use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use engine::{parse_team, Team, TeamSource};

/// A directory holding one `<round>.json` team file per round.
#[derive(Debug, Clone)]
pub struct AssignmentDir {
    root: PathBuf,
}

impl AssignmentDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn round_path(&self, round: u32) -> PathBuf {
        self.root.join(format!("{}.json", round))
    }
}

impl TeamSource for AssignmentDir {
    fn load_round(&self, round: u32) -> Result<Team> {
        let path = self.round_path(round);
        let text = read_text_auto(&path)
            .with_context(|| format!("failed to read team JSON: {}", path.display()))?;
        parse_team(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Reads a text file, honouring a UTF-8/UTF-16 byte order mark if present.
pub fn read_text_auto(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}
