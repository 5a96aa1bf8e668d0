//! FFmpeg filter builders for clip normalization and timeline compositing.
//!
//! Label conventions for the export graph: `concat_graph` emits
//! `[vcat][acat]`, `music_mix` consumes `[acat]` and emits `[amix]`,
//! `disclaimer_overlay` consumes `[vcat]` and emits `[vout]`.

/// lavfi silent audio source attached to segments with no narration, so
/// every clip presents the same stream layout to the concat filter.
pub const SILENCE_SOURCE: &str = "anullsrc=r=44100:cl=stereo";

/// Cover-scale to the target frame and center-crop. Source footage of any
/// dimensions comes out exactly `width`x`height` with no letterboxing.
pub fn fit_cover(width: u32, height: u32) -> String {
    format!("scale={width}:{height}:force_original_aspect_ratio=increase,crop={width}:{height}")
}

/// Centered zoom-in crop that pushes embedded provider branding out of
/// frame. Scaled dimensions are forced even for yuv420p.
pub fn watermark_zoom(width: u32, height: u32, factor: f64) -> String {
    format!("scale=trunc(iw*{factor}/2)*2:trunc(ih*{factor}/2)*2,crop={width}:{height}")
}

/// Centered crop-to-80% and rescale jump-cut ("pattern interrupt").
pub fn pattern_interrupt(width: u32, height: u32) -> String {
    format!("crop=trunc(iw*0.8/2)*2:trunc(ih*0.8/2)*2,scale={width}:{height}")
}

/// Constant timing, pixel format, and sample aspect shared by every
/// intermediate clip, so concatenation never renegotiates parameters.
pub fn normalize_output(fps: u32) -> String {
    format!("fps={fps},format=yuv420p,setsar=1")
}

/// lavfi solid-color source for the last-resort fallback visual.
pub fn color_source(width: u32, height: u32, fps: u32, color: &str) -> String {
    format!("color=c={color}:s={width}x{height}:r={fps}")
}

/// Concat filter across `n` uniform clips (video+audio pairs), re-encoding
/// rather than assuming identical inner codecs.
pub fn concat_graph(n: usize) -> String {
    let mut graph = String::new();
    for i in 0..n {
        graph.push_str(&format!("[{i}:v][{i}:a]"));
    }
    graph.push_str(&format!("concat=n={n}:v=1:a=1[vcat][acat]"));
    graph
}

/// Attenuate the music input and mix it under the narration track. The mix
/// ends with the narration (`duration=first`); the looped music input is
/// cut there.
pub fn music_mix(music_input: usize, volume: f64) -> String {
    format!(
        "[{music_input}:a]volume={volume:.2}[bgm];\
         [acat][bgm]amix=inputs=2:duration=first:dropout_transition=0:normalize=0[amix]"
    )
}

/// Scale the disclaimer image to a fraction of the frame width and anchor
/// it centered, `bottom_inset` pixels above the bottom edge.
pub fn disclaimer_overlay(
    overlay_input: usize,
    frame_width: u32,
    width_frac: f64,
    bottom_inset: u32,
) -> String {
    let target_width = ((frame_width as f64 * width_frac) as u32) & !1;
    format!(
        "[{overlay_input}:v]scale={target_width}:-2[dsc];\
         [vcat][dsc]overlay=(W-w)/2:H-h-{bottom_inset}[vout]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_cover() {
        let f = fit_cover(1080, 1920);
        assert!(f.contains("force_original_aspect_ratio=increase"));
        assert!(f.contains("crop=1080:1920"));
    }

    #[test]
    fn test_watermark_zoom() {
        let f = watermark_zoom(1080, 1920, 1.1);
        assert!(f.contains("iw*1.1"));
        assert!(f.contains("crop=1080:1920"));
        // Even-dimension guard for yuv420p
        assert!(f.contains("trunc"));
    }

    #[test]
    fn test_pattern_interrupt_restores_frame() {
        let f = pattern_interrupt(1080, 1920);
        assert!(f.contains("iw*0.8"));
        assert!(f.ends_with("scale=1080:1920"));
    }

    #[test]
    fn test_concat_graph() {
        let g = concat_graph(3);
        assert!(g.starts_with("[0:v][0:a][1:v][1:a][2:v][2:a]"));
        assert!(g.contains("concat=n=3:v=1:a=1"));
        assert!(g.ends_with("[vcat][acat]"));
    }

    #[test]
    fn test_music_mix_attenuates() {
        let g = music_mix(4, 0.10);
        assert!(g.contains("[4:a]volume=0.10"));
        assert!(g.contains("duration=first"));
        assert!(g.ends_with("[amix]"));
    }

    #[test]
    fn test_disclaimer_overlay_geometry() {
        let g = disclaimer_overlay(5, 1080, 0.9, 50);
        // 90% of 1080 is 972
        assert!(g.contains("scale=972:-2"));
        assert!(g.contains("H-h-50"));
        assert!(g.contains("[5:v]"));
        assert!(g.ends_with("[vout]"));
    }

    #[test]
    fn test_disclaimer_width_is_even() {
        // 45% of 1080 is 486; 45% of 1082 would be 486.9 -> 486
        let g = disclaimer_overlay(1, 1082, 0.45, 50);
        assert!(g.contains("scale=486:-2"));
    }

    #[test]
    fn test_color_source() {
        let s = color_source(1080, 1920, 24, "black");
        assert_eq!(s, "color=c=black:s=1080x1920:r=24");
    }
}
