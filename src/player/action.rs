use crate::library::Track;

/// Everything that can happen to the player. Fed one at a time to `reduce`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append an imported batch; selects the first track if nothing was selected.
    AddTracks(Vec<Track>),
    /// Select the track at this playlist index and start playing it.
    PlayTrack(usize),
    TogglePlay,
    /// Position reported by the audio output, in seconds.
    SetCurrentTime(f64),
    /// Length reported by the audio output, in seconds.
    SetDuration(f64),
    SetVolume(f32),
    ToggleMute,
    NextTrack,
    PreviousTrack,
    ToggleShuffle,
    ToggleRepeat,
    ClearPlaylist,
    /// New disc angle in degrees; stored modulo 360.
    UpdateRotation(f64),
    /// Rebuild `albums` from `tracks`.
    OrganizeAlbums,
}
