use crate::error::{Result, ValidationError};
use crate::models::{
    export_file_name, map_image_name, AppendRequest, Callout, CalloutDocument, Difficulty,
    NormalizedPoint, DEFAULT_MAP, IMAGE_EXTENSION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, PartialEq)]
struct CalloutSession {
    map: String,
    difficulty: Difficulty,
    callouts: Vec<Callout>,
}

/// A serialized session ready for the download/copy collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Callouts recorded for one map/difficulty pair.
///
/// Unlocked while it holds no callouts, Locked otherwise. Map and difficulty only change while
/// Unlocked; [`SessionController::reset_session`] is the only way back from Locked.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionController {
    session: CalloutSession,
    last_pick: Option<NormalizedPoint>,
}

impl Default for SessionController {
    fn default() -> Self {
        SessionController::new(DEFAULT_MAP, Difficulty::default())
    }
}

impl SessionController {
    pub fn new(map: impl Into<String>, difficulty: Difficulty) -> Self {
        SessionController {
            session: CalloutSession {
                map: map.into(),
                difficulty,
                callouts: Vec::new(),
            },
            last_pick: None,
        }
    }

    pub fn map(&self) -> &str {
        &self.session.map
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty
    }

    pub fn callouts(&self) -> &[Callout] {
        &self.session.callouts
    }

    pub fn state(&self) -> SessionState {
        if self.session.callouts.is_empty() {
            SessionState::Unlocked
        } else {
            SessionState::Locked
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == SessionState::Locked
    }

    /// Image asset for the current map.
    pub fn image_path(&self) -> String {
        map_image_name(&self.session.map)
    }

    pub fn last_pick(&self) -> Option<NormalizedPoint> {
        self.last_pick
    }

    /// Record the point most recently picked on the viewport.
    pub fn set_pick(&mut self, point: NormalizedPoint) {
        self.last_pick = Some(point);
    }

    /// Switch maps. On success returns the image the viewport should load next.
    pub fn change_map(&mut self, map: &str) -> Result<String> {
        if self.is_locked() {
            return Err(ValidationError::MapLocked);
        }
        if self.session.map != map {
            self.session.map = map.to_string();
            // A pick on the previous image means nothing on the new one.
            self.last_pick = None;
        }
        Ok(self.image_path())
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        if self.is_locked() {
            return Err(ValidationError::DifficultyLocked);
        }
        self.session.difficulty = difficulty;
        Ok(())
    }

    /// Append a callout named `name` (trimmed, `.png` added) at `point`.
    pub fn add_callout(&mut self, name: &str, point: NormalizedPoint) -> Result<&Callout> {
        let image_name = callout_image_name(name)?;
        self.session.callouts.push(Callout {
            image_name,
            location: point,
        });
        let index = self.session.callouts.len() - 1;
        Ok(&self.session.callouts[index])
    }

    /// Validate a pending add against the last pick and build the store request for it, without
    /// touching the session. The caller commits with [`SessionController::add_callout`] once the
    /// store has accepted it.
    pub fn append_request(&self, name: &str) -> Result<AppendRequest> {
        let filename = callout_image_name(name)?;
        let coordinates = self.last_pick.ok_or(ValidationError::NoPointPicked)?;
        Ok(AppendRequest {
            map: self.session.map.clone(),
            difficulty: self.session.difficulty,
            filename,
            coordinates,
        })
    }

    pub fn remove_callout(&mut self, index: usize) -> Result<Callout> {
        let total = self.session.callouts.len();
        if index >= total {
            return Err(ValidationError::IndexOutOfRange { index, total });
        }
        Ok(self.session.callouts.remove(index))
    }

    pub fn reset_session(&mut self) {
        self.session.callouts.clear();
    }

    pub fn document(&self) -> CalloutDocument {
        CalloutDocument {
            difficulty: self.session.difficulty,
            callouts: self.session.callouts.clone(),
        }
    }

    pub fn export_session(&self) -> std::result::Result<ExportArtifact, serde_json::Error> {
        Ok(ExportArtifact {
            file_name: export_file_name(self.session.difficulty, &self.session.map),
            contents: self.document().to_json_pretty()?,
        })
    }
}

fn callout_image_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(format!("{}{}", name, IMAGE_EXTENSION))
}
