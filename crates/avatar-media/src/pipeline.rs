//! Per-message audio and viseme rendering

use std::{path::PathBuf, sync::Arc, time::Instant};

use avatar_config::MediaConfig;
use avatar_core::ChatMessage;
use avatar_tts::SpeechSynthesizer;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::{
    error::MediaError,
    fixtures::FixtureStore,
    scratch::ScratchDir,
    tool::{CommandTool, TimingExtractor, Transcoder},
};

/// Renders speech audio and mouth-cue timing for reply messages
#[derive(Clone)]
pub struct MediaPipeline {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    transcoder: Arc<dyn Transcoder>,
    extractor: Arc<dyn TimingExtractor>,
    fixtures: FixtureStore,
    voice: String,
    work_dir: Option<PathBuf>,
}

impl MediaPipeline {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        transcoder: Arc<dyn Transcoder>,
        extractor: Arc<dyn TimingExtractor>,
        fixtures: FixtureStore,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            synthesizer,
            transcoder,
            extractor,
            fixtures,
            voice: voice.into(),
            work_dir: None,
        }
    }

    /// Pipeline using the configured command-line tools
    pub fn from_config(config: &MediaConfig, synthesizer: Arc<dyn SpeechSynthesizer>, voice: impl Into<String>) -> Self {
        let timeout = config.tool_timeout();

        Self::new(
            synthesizer,
            Arc::new(CommandTool::new(&config.transcoder, timeout)),
            Arc::new(CommandTool::new(&config.extractor, timeout)),
            FixtureStore::new(&config.fixture_dir),
            voice,
        )
        .with_work_dir(config.work_dir.clone())
    }

    /// Root under which scratch directories are created
    #[must_use]
    pub fn with_work_dir(mut self, work_dir: Option<PathBuf>) -> Self {
        self.work_dir = work_dir;
        self
    }

    pub fn fixtures(&self) -> &FixtureStore {
        &self.fixtures
    }

    pub fn synthesizer(&self) -> &Arc<dyn SpeechSynthesizer> {
        &self.synthesizer
    }

    /// Attach audio and timing to every message, in index order
    ///
    /// A failure for one message attaches the error fixture pair to it and
    /// moves on to the next; every message leaves with media set.
    pub async fn render(&self, messages: &mut [ChatMessage]) {
        let scratch = match ScratchDir::create(self.work_dir.as_deref()) {
            Ok(scratch) => scratch,
            Err(e) => {
                tracing::error!(error = %e, count = messages.len(), "no scratch space, using error fixture for all messages");
                for message in messages.iter_mut() {
                    self.fixtures.error_pair().await.attach_to(message);
                }
                return;
            }
        };

        tracing::debug!(scratch = %scratch.path().display(), count = messages.len(), "rendering media");

        for (index, message) in messages.iter_mut().enumerate() {
            match self.render_one(&scratch, index, &message.text).await {
                Ok((audio, lipsync)) => message.attach(audio, lipsync),
                Err(e) => {
                    tracing::error!(index, error = %e, "media pipeline failed, using error fixture");
                    self.fixtures.error_pair().await.attach_to(message);
                }
            }
        }
    }

    async fn render_one(&self, scratch: &ScratchDir, index: usize, text: &str) -> Result<(String, Value), MediaError> {
        let mp3 = scratch.message_file(index, "mp3");
        let wav = scratch.message_file(index, "wav");
        let json = scratch.message_file(index, "json");

        let started = Instant::now();
        let speech = self.synthesizer.synthesize(text, &self.voice).await?;
        tokio::fs::write(&mp3, &speech.audio)
            .await
            .map_err(|source| MediaError::Io { path: mp3.clone(), source })?;
        tracing::debug!(
            index,
            bytes = speech.audio.len(),
            content_type = %speech.content_type,
            elapsed_ms = elapsed_ms(started),
            "speech synthesized"
        );

        let started = Instant::now();
        self.transcoder.transcode(&mp3, &wav).await?;
        tracing::debug!(index, elapsed_ms = elapsed_ms(started), "audio transcoded");

        let started = Instant::now();
        self.extractor.extract(&wav, &json).await?;
        tracing::debug!(index, elapsed_ms = elapsed_ms(started), "timing extracted");

        let raw = tokio::fs::read(&json)
            .await
            .map_err(|source| MediaError::Io { path: json.clone(), source })?;
        let lipsync = serde_json::from_slice(&raw).map_err(|source| MediaError::InvalidTiming { path: json, source })?;

        Ok((STANDARD.encode(&speech.audio), lipsync))
    }
}

fn elapsed_ms(started: Instant) -> u128 {
    started.elapsed().as_millis()
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use avatar_core::{Animation, FacialExpression};
    use avatar_tts::{SpeechAudio, TtsError};
    use serde_json::json;

    use super::*;

    /// Speaks the text back as its own bytes, failing for one text
    struct EchoVoice {
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for EchoVoice {
        async fn synthesize(&self, text: &str, voice: &str) -> avatar_tts::Result<SpeechAudio> {
            self.calls.lock().unwrap().push(format!("{voice}:{text}"));
            if self.fail_on == Some(text) {
                return Err(TtsError::ProviderApiError {
                    status: 500,
                    message: "boom".to_owned(),
                });
            }
            Ok(SpeechAudio {
                audio: text.as_bytes().to_vec(),
                content_type: "audio/mpeg".to_owned(),
            })
        }

        async fn list_voices(&self) -> avatar_tts::Result<Value> {
            Ok(json!({"voices": []}))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    struct CopyFile;

    #[async_trait]
    impl Transcoder for CopyFile {
        async fn transcode(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
            tokio::fs::copy(input, output)
                .await
                .map(|_| ())
                .map_err(|source| MediaError::Io { path: output.to_path_buf(), source })
        }
    }

    /// Writes the audio contents as a single mouth cue
    struct Cue;

    #[async_trait]
    impl TimingExtractor for Cue {
        async fn extract(&self, audio: &Path, output: &Path) -> Result<(), MediaError> {
            let spoken = tokio::fs::read_to_string(audio).await.unwrap();
            let timing = json!({"mouthCues": [{"start": 0.0, "end": 0.5, "value": spoken}]});
            tokio::fs::write(output, timing.to_string()).await.unwrap();
            Ok(())
        }
    }

    struct Garbage;

    #[async_trait]
    impl TimingExtractor for Garbage {
        async fn extract(&self, _audio: &Path, output: &Path) -> Result<(), MediaError> {
            tokio::fs::write(output, "not json").await.unwrap();
            Ok(())
        }
    }

    fn fixtures() -> (tempfile::TempDir, FixtureStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("error.wav"), b"ERR").unwrap();
        std::fs::write(dir.path().join("error.json"), br#"{"mouthCues": []}"#).unwrap();
        let store = FixtureStore::new(dir.path());
        (dir, store)
    }

    fn messages(texts: &[&str]) -> Vec<ChatMessage> {
        texts
            .iter()
            .map(|t| ChatMessage::new(*t, FacialExpression::Smile, Animation::Talking0))
            .collect()
    }

    fn pipeline(voice: EchoVoice, extractor: Arc<dyn TimingExtractor>, fixtures: FixtureStore) -> MediaPipeline {
        MediaPipeline::new(Arc::new(voice), Arc::new(CopyFile), extractor, fixtures, "voice-x")
    }

    fn echo(fail_on: Option<&'static str>) -> EchoVoice {
        EchoVoice {
            fail_on,
            calls: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn every_message_gets_its_own_media() {
        let (_dir, store) = fixtures();
        let work = tempfile::tempdir().unwrap();
        let pipeline = pipeline(echo(None), Arc::new(Cue), store).with_work_dir(Some(work.path().to_path_buf()));

        let mut batch = messages(&["one", "two", "three"]);
        pipeline.render(&mut batch).await;

        for (message, text) in batch.iter().zip(["one", "two", "three"]) {
            assert_eq!(message.audio.as_deref(), Some(STANDARD.encode(text).as_str()));
            assert_eq!(message.lipsync.as_ref().unwrap()["mouthCues"][0]["value"], text);
        }

        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failure_at_one_index_only_affects_that_message() {
        let (_dir, store) = fixtures();
        let voice = echo(Some("two"));
        let pipeline = pipeline(voice, Arc::new(Cue), store);

        let mut batch = messages(&["one", "two", "three"]);
        pipeline.render(&mut batch).await;

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].audio.as_deref(), Some(STANDARD.encode("one").as_str()));
        assert_eq!(batch[1].audio.as_deref(), Some(STANDARD.encode("ERR").as_str()));
        assert_eq!(batch[1].lipsync, Some(json!({"mouthCues": []})));
        assert_eq!(batch[2].audio.as_deref(), Some(STANDARD.encode("three").as_str()));
    }

    #[tokio::test]
    async fn messages_are_synthesized_in_order_with_configured_voice() {
        let (_dir, store) = fixtures();
        let voice = Arc::new(echo(None));
        let pipeline = MediaPipeline::new(voice.clone(), Arc::new(CopyFile), Arc::new(Cue), store, "voice-x");

        pipeline.render(&mut messages(&["a", "b"])).await;

        assert_eq!(*voice.calls.lock().unwrap(), ["voice-x:a", "voice-x:b"]);
    }

    #[tokio::test]
    async fn invalid_timing_uses_error_fixture() {
        let (_dir, store) = fixtures();
        let pipeline = pipeline(echo(None), Arc::new(Garbage), store);

        let mut batch = messages(&["hello"]);
        pipeline.render(&mut batch).await;

        assert_eq!(batch[0].audio.as_deref(), Some(STANDARD.encode("ERR").as_str()));
    }

    #[tokio::test]
    async fn unusable_work_dir_degrades_every_message() {
        let (_dir, store) = fixtures();
        let pipeline = pipeline(echo(None), Arc::new(Cue), store)
            .with_work_dir(Some(PathBuf::from("/nonexistent/avatar/work")));

        let mut batch = messages(&["a", "b"]);
        pipeline.render(&mut batch).await;

        assert!(batch.iter().all(|m| m.audio.as_deref() == Some(STANDARD.encode("ERR").as_str())));
    }

    #[tokio::test]
    async fn unreadable_error_fixture_degrades_to_empty() {
        let pipeline = pipeline(echo(Some("x")), Arc::new(Cue), FixtureStore::new("/nonexistent/audios"));

        let mut batch = messages(&["x"]);
        pipeline.render(&mut batch).await;

        assert_eq!(batch[0].audio.as_deref(), Some(""));
        assert_eq!(batch[0].lipsync, Some(json!({})));
        assert!(batch[0].has_media());
    }
}
