use crate::config::{LATE_WINDOW_MS, STATUS_LOG_INTERVAL_MS};
use crate::core::audio::AudioSink;
use crate::core::input::Lane;
use crate::game::chart::{self, Difficulty, Schedule, ScheduledNote};
use crate::game::judgment::{Grade, HitResult, Judgment, grade_for_offset};
use crate::game::note::LiveNote;
use crate::game::scores::ScoreState;
use crate::game::scroll::ScrollSpeedSetting;
use crate::game::song::Song;
use log::{debug, info};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;

/// What one call to [`advance`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub spawned: usize,
    /// Lanes of notes that timed out this call, in active-set order.
    pub missed_lanes: Vec<Lane>,
}

/// Read-only view of the playfield for a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayfieldSnapshot {
    pub notes: Vec<(Lane, f32)>,
    pub scores: ScoreState,
    pub song_time_ms: i64,
}

/// Spawns due notes and times out the ones that travelled past the hit line.
///
/// A waiting note spawns once `target - approach <= now`. An unresolved
/// live note times out once `now - spawn >= approach + late_window`; it is
/// resolved, removed and its lane reported. Calling again with the same
/// `now_ms` changes nothing.
pub fn advance(
    active: &mut Vec<LiveNote>,
    waiting: &mut VecDeque<ScheduledNote>,
    now_ms: i64,
    approach_ms: i64,
    late_window_ms: i64,
) -> AdvanceReport {
    let mut report = AdvanceReport::default();

    while let Some(next) = waiting.front() {
        if next.target_time_ms - approach_ms > now_ms {
            break;
        }
        if let Some(scheduled) = waiting.pop_front() {
            active.push(LiveNote::spawn(&scheduled, approach_ms));
            report.spawned += 1;
        }
    }

    let timeout_ms = approach_ms + late_window_ms;
    active.retain_mut(|note| {
        if note.resolved {
            return false;
        }
        if now_ms - note.spawn_time_ms >= timeout_ms {
            note.resolve();
            report.missed_lanes.push(note.lane);
            return false;
        }
        true
    });

    report
}

/// Judges a press in `lane` against the closest unresolved note there.
///
/// Ties on distance go to the earlier target. The chosen note is consumed
/// whatever its grade, including Miss.
pub fn evaluate_hit(
    active: &mut Vec<LiveNote>,
    scores: &mut ScoreState,
    lane: Lane,
    now_ms: i64,
) -> HitResult {
    let Some(index) = active
        .iter()
        .enumerate()
        .filter(|(_, note)| note.lane == lane && !note.resolved)
        .min_by_key(|(_, note)| ((now_ms - note.target_time_ms).abs(), note.target_time_ms))
        .map(|(index, _)| index)
    else {
        return HitResult::NoNoteInLane;
    };

    let mut note = active.remove(index);
    note.resolve();

    let offset_ms = now_ms - note.target_time_ms;
    let grade = grade_for_offset(offset_ms);
    scores.apply(grade);

    HitResult::Judged(Judgment {
        offset_ms,
        grade,
        lane,
        target_time_ms: note.target_time_ms,
    })
}

pub struct State {
    pub song: Arc<Song>,
    pub difficulty: Difficulty,
    pub scroll_speed: ScrollSpeedSetting,
    pub waiting: VecDeque<ScheduledNote>,
    pub active: Vec<LiveNote>,
    pub scores: ScoreState,
    pub approach_ms: i64,
    pub late_window_ms: i64,
    pub duration_ms: i64,
    pub total_notes: usize,
    last_song_time_ms: Option<i64>,
    log_timer_ms: i64,
}

pub fn init<R: Rng + ?Sized>(
    song: Arc<Song>,
    difficulty: Difficulty,
    scroll_speed: ScrollSpeedSetting,
    rng: &mut R,
) -> State {
    let schedule = chart::generate_for_song(&song, difficulty, rng);
    from_schedule(song, difficulty, scroll_speed, schedule)
}

/// Builds the engine around an already generated chart.
pub fn from_schedule(
    song: Arc<Song>,
    difficulty: Difficulty,
    scroll_speed: ScrollSpeedSetting,
    schedule: Schedule,
) -> State {
    info!(
        "Initializing gameplay: '{}' ({}, {:.0} BPM, length {}).",
        song.name,
        difficulty,
        song.bpm,
        song.formatted_length()
    );
    let approach_ms = scroll_speed.approach_duration_ms();
    info!(
        "{} chart notes over {} ms, scroll speed {} (approach {} ms).",
        schedule.len(),
        schedule.duration_ms,
        scroll_speed,
        approach_ms
    );

    State {
        song,
        difficulty,
        scroll_speed,
        total_notes: schedule.len(),
        duration_ms: schedule.duration_ms,
        waiting: schedule.notes.into(),
        active: Vec::new(),
        scores: ScoreState::new(),
        approach_ms,
        late_window_ms: LATE_WINDOW_MS,
        last_song_time_ms: None,
        log_timer_ms: 0,
    }
}

/// Per-frame engine step: spawn, time out, and score the timeouts as misses.
pub fn update(state: &mut State, song_time_ms: i64) -> AdvanceReport {
    let report = advance(
        &mut state.active,
        &mut state.waiting,
        song_time_ms,
        state.approach_ms,
        state.late_window_ms,
    );

    for lane in &report.missed_lanes {
        state.scores.apply(Grade::Miss);
        info!("MISSED: Lane {}, Time: {} ms", lane, song_time_ms);
    }

    if let Some(last) = state.last_song_time_ms {
        state.log_timer_ms += (song_time_ms - last).max(0);
    }
    state.last_song_time_ms = Some(song_time_ms);
    if state.log_timer_ms >= STATUS_LOG_INTERVAL_MS {
        info!(
            "Time: {} ms, Score: {}, Combo: {}, Misses: {}, Active Notes: {}, Waiting: {}",
            song_time_ms,
            state.scores.score,
            state.scores.combo,
            state.scores.count(Grade::Miss),
            state.active.len(),
            state.waiting.len()
        );
        state.log_timer_ms -= STATUS_LOG_INTERVAL_MS;
    }

    report
}

/// Judges a lane press and plays the matching hit sound.
pub fn judge_lane_press<A: AudioSink + ?Sized>(
    state: &mut State,
    lane: Lane,
    song_time_ms: i64,
    audio: &mut A,
) -> HitResult {
    let result = evaluate_hit(&mut state.active, &mut state.scores, lane, song_time_ms);
    match &result {
        HitResult::Judged(judgment) => {
            audio.play_hit_sound(judgment.grade);
            info!(
                "JUDGED: Lane {}, Error: {} ms, Grade: {:?}, Combo: {}",
                lane, judgment.offset_ms, judgment.grade, state.scores.combo
            );
        }
        HitResult::NoNoteInLane => debug!("Press in empty lane {} at {} ms.", lane, song_time_ms),
    }
    result
}

pub fn is_finished(state: &State, song_time_ms: i64) -> bool {
    state.active.is_empty() && state.waiting.is_empty() && song_time_ms >= state.duration_ms
}

pub fn snapshot(state: &State, song_time_ms: i64) -> PlayfieldSnapshot {
    PlayfieldSnapshot {
        notes: state
            .active
            .iter()
            .filter(|note| !note.resolved)
            .map(|note| (note.lane, note.progress(song_time_ms, state.approach_ms)))
            .collect(),
        scores: state.scores.clone(),
        song_time_ms,
    }
}
