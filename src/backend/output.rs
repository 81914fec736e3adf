use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};
use tracing::warn;

use super::sink::create_sink_at;
use super::types::{MediaBackend, MediaEvent, OutputCmd, PlaybackState};

/// Media backend playing through the default `rodio` output device.
///
/// All device work happens on a dedicated thread; this handle only moves
/// commands onto the channel, so every trait method is non-blocking.
pub struct RodioBackend {
    tx: Sender<OutputCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioBackend {
    /// Spawn the output thread and return the backend handle together with
    /// the receiver for its [`MediaEvent`] notifications.
    pub fn spawn() -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<OutputCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();

        let join = spawn_output_thread(rx, event_tx);

        (
            Self {
                tx,
                join: Mutex::new(Some(join)),
            },
            event_rx,
        )
    }

    fn send(&self, cmd: OutputCmd) {
        // A closed channel means the output thread is gone; the command is
        // simply dropped.
        let _ = self.tx.send(cmd);
    }

    /// Stop playback and join the output thread.
    pub fn shutdown(&self) {
        self.send(OutputCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load_and_play(&mut self, path: &Path) {
        self.send(OutputCmd::Load(path.to_path_buf()));
    }

    fn pause(&mut self) {
        self.send(OutputCmd::Pause);
    }

    fn resume(&mut self) {
        self.send(OutputCmd::Resume);
    }

    fn stop(&mut self) {
        self.send(OutputCmd::Stop);
    }

    fn seek(&mut self, position_ms: u64) {
        self.send(OutputCmd::Seek(position_ms));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(OutputCmd::SetVolume(volume));
    }
}

fn spawn_output_thread(rx: Receiver<OutputCmd>, events: Sender<MediaEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                // Without an output device there is nothing to drive; any
                // further commands land on a closed channel.
                warn!("no audio output device: {e}");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for an interactive program.
        stream.log_on_drop(false);

        let mut current: Option<PathBuf> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = true;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        let mut volume: f32 = 1.0;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(OutputCmd::Load(path)) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    match create_sink_at(&stream, &path, Duration::ZERO) {
                        Ok((new_sink, total)) => {
                            new_sink.set_volume(volume);
                            new_sink.play();
                            sink = Some(new_sink);
                            current = Some(path);
                            paused = false;
                            started_at = Some(Instant::now());
                            accumulated = Duration::ZERO;

                            let duration_ms =
                                total.map(|d| d.as_millis() as u64).unwrap_or(0);
                            let _ = events.send(MediaEvent::DurationChanged(duration_ms));
                            let _ = events.send(MediaEvent::PositionChanged(0));
                            let _ =
                                events.send(MediaEvent::StateChanged(PlaybackState::Playing));
                        }
                        Err(e) => {
                            warn!("cannot play {}: {e}", path.display());
                            current = None;
                            paused = true;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            let _ = events.send(MediaEvent::Failed {
                                path,
                                message: e.to_string(),
                            });
                            let _ =
                                events.send(MediaEvent::StateChanged(PlaybackState::Stopped));
                        }
                    }
                }

                Ok(OutputCmd::Pause) => {
                    if let Some(ref s) = sink {
                        if !paused {
                            s.pause();
                            if let Some(st) = started_at {
                                accumulated += st.elapsed();
                            }
                            started_at = None;
                            paused = true;
                            let _ = events.send(MediaEvent::StateChanged(PlaybackState::Paused));
                        }
                    }
                }

                Ok(OutputCmd::Resume) => {
                    if let Some(ref s) = sink {
                        if paused {
                            s.play();
                            started_at = Some(Instant::now());
                            paused = false;
                            let _ =
                                events.send(MediaEvent::StateChanged(PlaybackState::Playing));
                        }
                    }
                }

                Ok(OutputCmd::Stop) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    current = None;
                    paused = true;
                    started_at = None;
                    accumulated = Duration::ZERO;
                    let _ = events.send(MediaEvent::PositionChanged(0));
                    let _ = events.send(MediaEvent::StateChanged(PlaybackState::Stopped));
                }

                Ok(OutputCmd::Seek(position_ms)) => {
                    // Seeking rebuilds the sink and skips into the file.
                    // This uses `Source::skip_duration` (works for common formats).
                    let Some(path) = current.clone() else {
                        continue;
                    };
                    if sink.is_none() {
                        continue;
                    }

                    if let Some(ref s) = sink {
                        s.stop();
                    }

                    let target = Duration::from_millis(position_ms);
                    match create_sink_at(&stream, &path, target) {
                        Ok((new_sink, _)) => {
                            new_sink.set_volume(volume);
                            if paused {
                                new_sink.pause();
                                started_at = None;
                            } else {
                                new_sink.play();
                                started_at = Some(Instant::now());
                            }
                            sink = Some(new_sink);
                            accumulated = target;
                            let _ = events.send(MediaEvent::PositionChanged(position_ms));
                        }
                        Err(e) => {
                            warn!("cannot seek in {}: {e}", path.display());
                            sink = None;
                            current = None;
                            paused = true;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            let _ = events.send(MediaEvent::Failed {
                                path,
                                message: e.to_string(),
                            });
                            let _ =
                                events.send(MediaEvent::StateChanged(PlaybackState::Stopped));
                        }
                    }
                }

                Ok(OutputCmd::SetVolume(v)) => {
                    volume = v.clamp(0.0, 1.0);
                    if let Some(ref s) = sink {
                        s.set_volume(volume);
                    }
                }

                Ok(OutputCmd::Quit) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    let _ = events.send(MediaEvent::StateChanged(PlaybackState::Stopped));
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: report position, detect end-of-media.
                    let Some(ref s) = sink else {
                        continue;
                    };
                    if paused {
                        continue;
                    }
                    if s.empty() {
                        sink = None;
                        current = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        // The core decides what plays next; no auto-advance here.
                        let _ = events.send(MediaEvent::EndOfMedia);
                    } else {
                        let elapsed =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        let _ = events
                            .send(MediaEvent::PositionChanged(elapsed.as_millis() as u64));
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
