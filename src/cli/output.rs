//! Console and JSON output formatting for analysis results

use colorful::Colorful;

use crate::core::AnalysisResult;

const RULE: &str = "============================================================";

/// Print the full per-file report.
pub fn print_report(result: &AnalysisResult, verbose: bool) {
    println!("\n{}", RULE);
    println!("File: {}", result.filename.clone().cyan());
    println!("{}", RULE);

    println!("\nBasic Info:");
    println!("   Duration: {:.2}s", result.duration);
    println!("   Sample Rate: {} Hz", result.sample_rate);
    println!("   Channels: {}", result.channels);

    println!("\nLoudness Metrics:");
    println!("   RMS Level: {:.1} dBFS", result.loudness.rms_db);
    println!("   Peak Level: {:.1} dBFS", result.loudness.peak_db);
    println!("   Peak Amplitude: {:.4}", result.loudness.peak_amplitude);
    println!(
        "   Loudness (est.): {:.1} dB",
        result.loudness.loudness_estimate
    );
    println!("   Dynamic Range: {:.1} dB", result.loudness.dynamic_range);

    println!("\nClipping Analysis:");
    if result.clipping.clip_ratio > 0.0 {
        println!(
            "   Clipped samples: {} / {}",
            result.clipping.clipped_samples, result.clipping.total_samples
        );
        println!(
            "   Clip ratio: {:.4}%",
            result.clipping.clip_ratio * 100.0
        );
        if verbose && !result.clipping.intervals.is_empty() {
            println!("   Clipped regions:");
            for interval in result.clipping.intervals.iter().take(5) {
                println!(
                    "      {:.3}s - {:.3}s",
                    interval.start_time, interval.end_time
                );
            }
            if result.clipping.intervals.len() > 5 {
                println!(
                    "      ... and {} more",
                    result.clipping.intervals.len() - 5
                );
            }
        }
    } else {
        println!("   {}", "No clipping detected".green());
    }

    println!("\nSilence Detection:");
    if result.silence_events.is_empty() {
        println!("   {}", "No significant silence detected".green());
    } else {
        let total_silence: f64 = result.silence_events.iter().map(|e| e.duration).sum();
        let silence_ratio = if result.duration > 0.0 {
            total_silence / result.duration
        } else {
            0.0
        };
        println!(
            "   Found {} silence period(s)",
            result.silence_events.len()
        );
        println!(
            "   Total silence: {:.2}s ({:.1}% of file)",
            total_silence,
            silence_ratio * 100.0
        );
        if verbose {
            println!("   Silence events:");
            for event in result.silence_events.iter().take(5) {
                println!(
                    "      {:.2}s - {:.2}s ({:.2}s)",
                    event.start_time, event.end_time, event.duration
                );
            }
            if result.silence_events.len() > 5 {
                println!("      ... and {} more", result.silence_events.len() - 5);
            }
        }
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("   {}", format!("* {}", warning).yellow());
        }
    }

    if let Some(path) = &result.spectrum_path {
        println!("\nSpectrum plot saved: {}", path.display());
    }

    println!("\n{}", RULE);
}

/// Single-line report for quiet mode: only files with warnings.
pub fn print_quiet(result: &AnalysisResult) {
    if result.warnings.is_empty() {
        return;
    }
    println!(
        "{}: {}",
        result.filename.clone().cyan(),
        result.warnings.join("; ").yellow()
    );
}

/// Serialize one result as pretty JSON.
pub fn print_json(result: &AnalysisResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize result: {}", e),
    }
}

/// Batch summary: failure list, files with issues, and a loudness ranking.
pub fn print_summary(results: &[AnalysisResult], errors: &[(String, String)]) {
    println!("\n{}", RULE);
    println!("SUMMARY");
    println!("{}", RULE);
    println!("\nAnalyzed {} file(s) successfully", results.len());

    if !errors.is_empty() {
        println!(
            "{}",
            format!("Failed to analyze {} file(s):", errors.len()).red()
        );
        for (file, message) in errors {
            println!("  * {}: {}", file, message);
        }
    }

    let problem_files: Vec<_> = results.iter().filter(|r| !r.warnings.is_empty()).collect();
    if !problem_files.is_empty() {
        println!("\nFiles with potential issues:");
        for result in &problem_files {
            println!(
                "  * {}: {} warning(s)",
                result.filename,
                result.warnings.len()
            );
        }
    }

    println!("\nLoudness ranking:");
    let mut ranked: Vec<&AnalysisResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        b.loudness
            .loudness_estimate
            .partial_cmp(&a.loudness.loudness_estimate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for result in ranked {
        println!(
            "  {:>7.1} dB  -  {}",
            result.loudness.loudness_estimate, result.filename
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClippingSummary, LoudnessMetrics};

    fn result(name: &str, loudness_estimate: f64) -> AnalysisResult {
        AnalysisResult {
            filename: name.to_string(),
            sample_rate: 44100,
            duration: 1.0,
            channels: 1,
            silence_events: Vec::new(),
            loudness: LoudnessMetrics {
                rms_db: -12.0,
                peak_db: -6.0,
                peak_amplitude: 0.5,
                loudness_estimate,
                dynamic_range: 6.0,
            },
            clipping: ClippingSummary {
                clipped_samples: 0,
                total_samples: 44100,
                clip_ratio: 0.0,
                intervals: Vec::new(),
            },
            spectrum_path: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&result("a.wav", -15.0)).unwrap();
        assert!(json.contains("\"filename\":\"a.wav\""));
        assert!(json.contains("\"clip_ratio\":0.0"));
    }

    #[test]
    fn test_json_infinity_serializes_as_null() {
        let mut r = result("a.wav", f64::NEG_INFINITY);
        r.loudness.rms_db = f64::NEG_INFINITY;
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"rms_db\":null"));
    }
}
