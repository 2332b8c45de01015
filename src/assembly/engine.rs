use std::path::Path;
use tracing::{info, debug, warn};
use tokio::task;

use crate::{
    audio::{AudioProbe, Soundtrack},
    config::Config,
    error::{AssemblyError, EncodeError, Result},
    pan::{PanPlanner, PanSelection, PanWindow},
    video::{EncodedReel, Frame, PanSampler, ReelEncoder, ReelParams, Slide, SlideLoader},
};

/// Main assembly engine that orchestrates the entire reel creation process
///
/// The engine follows a clear pipeline:
/// 1. Soundtrack Probing - Validate both audio inputs and read their durations
/// 2. Slide Loading - Discover still images and cover-resize them
/// 3. Reel Planning - Split the frame budget and assign pan directions
/// 4. Rendering - Stream panned frames into the external encoder
/// 5. Mixing - Lay the mixed soundtrack under the video and finalize
pub struct AssemblyEngine {
    config: Config,
}

impl AssemblyEngine {
    /// Create a new assembly engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Main assembly method - orchestrates the entire pipeline
    ///
    /// # Arguments
    ///
    /// * `images_dir` - Directory containing the still images
    /// * `voiceover` - Path to the narration audio file
    /// * `music` - Path to the background music file
    /// * `output` - Path for the final reel
    pub async fn assemble<P: AsRef<Path>>(
        &self,
        images_dir: P,
        voiceover: P,
        music: P,
        output: P,
    ) -> Result<EncodedReel> {
        let images_dir = images_dir.as_ref();
        let voiceover = voiceover.as_ref();
        let music = music.as_ref();
        let output = output.as_ref();

        info!("🎬 Starting reel assembly");
        info!("   Images: {:?}", images_dir);
        info!("   Voiceover: {:?}", voiceover);
        info!("   Music: {:?}", music);
        info!("   Output: {:?}", output);

        // Pipeline Step 1: Soundtrack Probing
        let soundtrack = self.probe_soundtrack(voiceover, music).await?;

        // Pipeline Step 2: Slide Discovery and Loading
        let slides = self.load_slides(images_dir).await?;

        // Pipeline Step 3: Reel Planning
        let plan = self.plan_reel(slides).await?;

        // Pipeline Steps 4 and 5: Rendering and Mixing
        let reel = self.render_and_encode(plan, soundtrack, output).await?;

        info!("🎉 Reel complete! Output saved to: {:?}", output);
        Ok(reel)
    }

    // ==========================================
    // PIPELINE STEP 1: SOUNDTRACK PROBING
    // ==========================================

    /// Probe both audio inputs and warn about length mismatches
    async fn probe_soundtrack(&self, voiceover: &Path, music: &Path) -> Result<Soundtrack> {
        info!("🎵 Step 1: Probing soundtrack...");

        let reel_duration = self.config.reel.params.duration_secs;

        let voice_info = AudioProbe::probe(voiceover)?;
        info!("   Voiceover: {:.1}s, {} Hz, {} channel(s)",
              voice_info.duration_secs, voice_info.sample_rate, voice_info.channels);

        if voice_info.duration_secs > reel_duration {
            warn!("Voiceover runs {:.1}s but the reel is {:.1}s; the end will be cut off",
                  voice_info.duration_secs, reel_duration);
        }

        let music_info = AudioProbe::probe(music)?;
        info!("   Music: {:.1}s, {} Hz, {} channel(s)",
              music_info.duration_secs, music_info.sample_rate, music_info.channels);

        if music_info.duration_secs < reel_duration && !self.config.audio.loop_music {
            warn!("Music ends {:.1}s before the reel does (set audio.loop_music to loop it)",
                  reel_duration - music_info.duration_secs);
        }

        Ok(Soundtrack::new(voiceover, music, &self.config.audio))
    }

    // ==========================================
    // PIPELINE STEP 2: SLIDE DISCOVERY & LOADING
    // ==========================================

    /// Discover supported images and prepare each one for panning
    async fn load_slides(&self, images_dir: &Path) -> Result<Vec<(Slide, Frame)>> {
        info!("🖼️  Step 2: Loading slides...");

        let slides = SlideLoader::discover(images_dir, self.config.reel.max_slides)?;
        let params = self.config.reel.params;

        let mut loaded = Vec::with_capacity(slides.len());
        for slide in slides {
            match SlideLoader::load_cover(&slide, &params) {
                Ok(image) => loaded.push((slide, image)),
                Err(e) => warn!("Skipping slide {:?}: {}", slide.path, e),
            }
        }

        if loaded.is_empty() {
            return Err(AssemblyError::EmptyPlan {
                reason: format!("no usable images in {}", images_dir.display()),
            }.into());
        }

        info!("   ✅ Slides ready: {}", loaded.len());
        for (slide, image) in &loaded {
            debug!("      {:02} - {} ({}x{})",
                   slide.index, slide.name, image.width(), image.height());
        }

        Ok(loaded)
    }

    // ==========================================
    // PIPELINE STEP 3: REEL PLANNING
    // ==========================================

    /// Distribute the frame budget and assign a pan direction per slide
    async fn plan_reel(&self, slides: Vec<(Slide, Frame)>) -> Result<ReelPlan> {
        info!("⏱️  Step 3: Planning the reel...");

        let params = self.config.reel.params;
        let mut planner = PanPlanner::new(self.config.pan.seed, self.config.pan.allow_vertical);
        let plan = ReelPlan::build(slides, &params, self.config.pan.mode, &mut planner);

        if plan.slides.is_empty() || plan.total_frames == 0 {
            return Err(AssemblyError::EmptyPlan {
                reason: "reel has no frames to render".to_string(),
            }.into());
        }

        info!("   ✅ Reel planned:");
        info!("      Slides: {}", plan.slides.len());
        info!("      Total frames: {}", plan.total_frames);
        for slide in &plan.slides {
            debug!("      {:02} - {} ({} frames, {:.1}s, pan {})",
                   slide.index, slide.name, slide.frame_count,
                   slide.frame_count as f64 / params.fps as f64,
                   slide.window.direction());
        }

        Ok(plan)
    }

    // ==========================================
    // PIPELINE STEPS 4 & 5: RENDERING & MIXING
    // ==========================================

    /// Render every planned frame into the encoder, then mix the soundtrack
    ///
    /// The whole pass runs on a blocking thread; a dedicated rayon pool
    /// renders each chunk of frames in parallel while the encoder consumes
    /// them in order.
    async fn render_and_encode(
        &self,
        plan: ReelPlan,
        soundtrack: Soundtrack,
        output: &Path,
    ) -> Result<EncodedReel> {
        info!("🎞️  Step 4: Rendering {} frames...", plan.total_frames);

        if !ReelEncoder::check_ffmpeg_available() {
            return Err(EncodeError::FfmpegMissing.into());
        }

        let params = self.config.reel.params;
        let settings = self.config.encoder.clone();
        let threads = self.config.reel.processing_threads;
        let output_path = output.to_path_buf();

        let reel = task::spawn_blocking(move || -> Result<EncodedReel> {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| AssemblyError::InvalidParameters {
                    details: format!("render pool: {}", e),
                })?;

            let mut encoder = ReelEncoder::new(params, settings);
            let mut sink = encoder.start_video()?;

            // Render about a second of frames at a time so memory stays flat
            let chunk_size = (params.fps as usize).max(1);

            pool.install(|| -> Result<()> {
                for slide in &plan.slides {
                    debug!("Rendering slide {:02} '{}' ({} frames, pan {})",
                           slide.index, slide.name, slide.frame_count,
                           slide.window.direction());

                    let sampler = PanSampler::new(&slide.image, slide.window, slide.frame_count);
                    let mut start = 0;
                    while start < slide.frame_count {
                        let end = (start + chunk_size).min(slide.frame_count);
                        for frame in sampler.render_range(start..end) {
                            sink.write_frame(&frame)?;
                        }
                        start = end;
                    }
                }
                Ok(())
            })?;

            let (video_path, frames_written) = sink.finish()?;

            if frames_written != plan.total_frames {
                return Err(EncodeError::EncodingFailed {
                    reason: format!("wrote {} frames, expected {}",
                                    frames_written, plan.total_frames),
                }.into());
            }

            info!("🎚️  Step 5: Mixing soundtrack...");
            encoder.mix_soundtrack(&video_path, &soundtrack, &output_path)?;

            let reel = encoder.finalize(&output_path, frames_written)?;
            encoder.cleanup()?;
            Ok(reel)
        })
        .await
        .map_err(|e| AssemblyError::OutputFailed {
            reason: format!("render task failed: {}", e),
        })??;

        info!("   ✅ Output generation complete:");
        info!("      File saved: {:?}", reel.path);
        info!("      Duration: {:.1}s", reel.duration);
        info!("      Frame count: {}", reel.frame_count);
        info!("      File size: {:.1} MB", reel.file_size as f64 / 1024.0 / 1024.0);

        Ok(reel)
    }
}

// ==========================================
// REEL PLAN DATA STRUCTURES
// ==========================================

/// Renderable plan for one reel: each slide with its prepared image, pan
/// window, and share of the frame budget
#[derive(Debug)]
pub struct ReelPlan {
    /// Slides in reel order
    pub slides: Vec<SlidePlan>,

    /// Total frames across all slides
    pub total_frames: usize,

    /// Output frame rate the plan was built for
    pub fps: u32,
}

/// One slide's share of the reel
#[derive(Debug)]
pub struct SlidePlan {
    pub index: usize,
    pub name: String,
    pub image: Frame,
    pub window: PanWindow,
    pub frame_count: usize,
}

impl ReelPlan {
    /// Split the frame budget across the slides and assign pan directions
    pub fn build(
        slides: Vec<(Slide, Frame)>,
        params: &ReelParams,
        mode: PanSelection,
        planner: &mut PanPlanner,
    ) -> Self {
        let total_frames = params.frame_count();
        let counts = partition_frames(total_frames, slides.len());

        let slides: Vec<SlidePlan> = slides
            .into_iter()
            .zip(counts)
            .map(|((slide, image), frame_count)| {
                let direction = planner.choose(mode);
                let window = PanWindow::new(
                    image.width(),
                    image.height(),
                    params.width,
                    params.height,
                    direction,
                );

                SlidePlan {
                    index: slide.index,
                    name: slide.name,
                    image,
                    window,
                    frame_count,
                }
            })
            .collect();

        Self {
            slides,
            total_frames,
            fps: params.fps,
        }
    }

    /// Seconds of screen time slide `index` receives
    pub fn slide_duration(&self, index: usize) -> f64 {
        self.slides
            .get(index)
            .map(|slide| slide.frame_count as f64 / self.fps as f64)
            .unwrap_or(0.0)
    }
}

// Split `total` frames over `slides` clips so counts differ by at most one
// and sum exactly to `total`.
fn partition_frames(total: usize, slides: usize) -> Vec<usize> {
    if slides == 0 {
        return Vec::new();
    }

    (0..slides)
        .map(|i| (total * (i + 1)) / slides - (total * i) / slides)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pan::PanDirection;
    use tempfile::tempdir;

    fn test_params() -> ReelParams {
        ReelParams {
            width: 4,
            height: 4,
            fps: 30,
            duration_secs: 1.0,
        }
    }

    fn test_slides(count: usize) -> Vec<(Slide, Frame)> {
        (0..count)
            .map(|index| {
                let slide = Slide::new(format!("{:02}_slide.png", index), index);
                (slide, Frame::new_filled(8, 4, [index as u8, 0, 0]))
            })
            .collect()
    }

    #[test]
    fn test_partition_covers_every_frame() {
        for slides in 1..=6 {
            let counts = partition_frames(450, slides);
            assert_eq!(counts.len(), slides);
            assert_eq!(counts.iter().sum::<usize>(), 450);

            let min = counts.iter().min().unwrap();
            let max = counts.iter().max().unwrap();
            assert!(max - min <= 1);
        }
    }

    #[test]
    fn test_partition_handles_tiny_budgets() {
        assert_eq!(partition_frames(2, 4), vec![0, 1, 0, 1]);
        assert_eq!(partition_frames(0, 3), vec![0, 0, 0]);
        assert!(partition_frames(10, 0).is_empty());
    }

    #[test]
    fn test_plan_splits_the_frame_budget() {
        let params = test_params();
        let mut planner = PanPlanner::new(Some(42), false);
        let plan = ReelPlan::build(test_slides(2), &params, PanSelection::Auto, &mut planner);

        assert_eq!(plan.total_frames, 30);
        assert_eq!(plan.slides.len(), 2);
        assert_eq!(plan.slides[0].frame_count, 15);
        assert_eq!(plan.slides[1].frame_count, 15);
        assert_eq!(plan.slide_duration(0), 0.5);
    }

    #[test]
    fn test_plan_pins_a_fixed_direction() {
        let params = test_params();
        let mut planner = PanPlanner::new(None, false);
        let plan = ReelPlan::build(
            test_slides(3),
            &params,
            PanSelection::RightToLeft,
            &mut planner,
        );

        for slide in &plan.slides {
            assert_eq!(slide.window.direction(), PanDirection::RightToLeft);
        }
    }

    #[tokio::test]
    async fn test_empty_images_directory() {
        let config = Config::default();
        let engine = AssemblyEngine::new(config);

        let temp_dir = tempdir().unwrap();
        let empty_dir = temp_dir.path().join("empty");
        std::fs::create_dir(&empty_dir).unwrap();

        let result = engine.load_slides(&empty_dir).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_voiceover_fails_the_probe() {
        let config = Config::default();
        let engine = AssemblyEngine::new(config);

        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("voice.wav");
        let music = temp_dir.path().join("music.wav");

        let result = engine.probe_soundtrack(&missing, &music).await;
        assert!(result.is_err());
    }
}
