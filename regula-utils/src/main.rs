// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use std::io::{BufRead, Write};

use ansi_term::Colour::{Purple, Yellow};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Step a PID controller over samples read from stdin", long_about = None)]
struct Args {
    /// Proportional gain.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    kp: f32,
    /// Integral gain.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    ki: f32,
    /// Derivative gain.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    kd: f32,
    /// Target value.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    target: f32,
    /// Accept inputs within this range of the target.
    #[arg(long, allow_negative_numbers = true)]
    target_range: Option<f32>,
    /// Lower bound of the acceptance band.
    #[arg(long, requires = "target_max", allow_negative_numbers = true)]
    target_min: Option<f32>,
    /// Upper bound of the acceptance band.
    #[arg(long, requires = "target_min", allow_negative_numbers = true)]
    target_max: Option<f32>,
    /// Output scale.
    #[arg(short, long, default_value_t = regula::consts::DEFAULT_SCALE, allow_negative_numbers = true)]
    scale: f32,
    /// Lower output bound.
    #[arg(long, requires = "output_max", allow_negative_numbers = true)]
    output_min: Option<f32>,
    /// Upper output bound.
    #[arg(long, requires = "output_min", allow_negative_numbers = true)]
    output_max: Option<f32>,
    /// Maximum magnitude of the integral term.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    max_integral: f32,
    /// Input filter blend gain between 0 and 1.
    #[arg(long, allow_negative_numbers = true)]
    filter: Option<f32>,
    /// Write every step as a JSON line.
    #[arg(long)]
    json: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> regula::PidConfig {
        regula::PidConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            target: self.target,
            target_range: self.target_range,
            target_bounds: self.target_min.zip(self.target_max),
            scale: self.scale,
            output_range: self.output_min.zip(self.output_max),
            max_integral_output: self.max_integral,
            input_filter: self.filter,
        }
    }
}

/// Parse one line of input.
///
/// Blank lines and lines starting with `#` carry no sample.
fn parse_sample(line: &str) -> anyhow::Result<Option<f32>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let value = line
        .parse::<f32>()
        .with_context(|| format!("invalid sample '{}'", line))?;

    Ok(Some(value))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(log::LevelFilter::Off);
    log_config.set_thread_level(log::LevelFilter::Off);
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    let log_level = match args.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let config = args.config();

    log::trace!("{:#?}", config);

    let pid = config.build().context("invalid controller configuration")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    run(pid, stdin.lock(), &mut stdout.lock(), args.json)
}

fn run(
    mut pid: regula::Pid,
    reader: impl BufRead,
    writer: &mut impl Write,
    json: bool,
) -> anyhow::Result<()> {
    let mut sample_count = 0;
    let mut saturated_count = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        let input = match parse_sample(&line).with_context(|| format!("line {}", line_number))? {
            Some(input) => input,
            None => continue,
        };

        let step = pid.step(input);
        sample_count += 1;

        if step.saturated {
            saturated_count += 1;
            log::info!(
                "{} {} » {}",
                Purple.paint(format!("[line {}]", line_number)),
                Yellow.bold().paint("Saturated"),
                step
            );
        }

        if json {
            writeln!(writer, "{}", serde_json::to_string(&step)?)?;
        } else {
            writeln!(writer, "{}", step.output)?;
        }
    }

    writer.flush()?;

    log::debug!(
        "Processed {} samples, {} saturated",
        sample_count,
        saturated_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample() {
        assert_eq!(parse_sample("1.5").unwrap(), Some(1.5));
        assert_eq!(parse_sample("  -3 \n").unwrap(), Some(-3.0));
        assert_eq!(parse_sample("").unwrap(), None);
        assert_eq!(parse_sample("# comment").unwrap(), None);
        assert!(parse_sample("abc").is_err());
    }

    #[test]
    fn test_run_plain() {
        let pid = regula::PidConfig::default().build().unwrap();

        let input = "10\n\n# skip\n-4\n";
        let mut output = Vec::new();
        run(pid, input.as_bytes(), &mut output, false).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "-10\n4\n");
    }

    #[test]
    fn test_run_json() {
        let pid = regula::PidConfig::default().build().unwrap();

        let mut output = Vec::new();
        run(pid, "2\n".as_bytes(), &mut output, true).unwrap();

        let line = String::from_utf8(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["output"], -2.0);
        assert_eq!(value["saturated"], false);
    }

    #[test]
    fn test_run_invalid_line() {
        let pid = regula::PidConfig::default().build().unwrap();

        let mut output = Vec::new();
        let result = run(pid, "1\nnope\n".as_bytes(), &mut output, false);

        let error = result.unwrap_err();
        assert!(format!("{:#}", error).contains("line 2"));
    }

    #[test]
    fn test_args_config() {
        let args = Args::parse_from([
            "regulactl",
            "--kp",
            "2",
            "--target",
            "-1.5",
            "--output-min",
            "-10",
            "--output-max",
            "10",
        ]);

        let config = args.config();
        assert_eq!(config.kp, 2.0);
        assert_eq!(config.target, -1.5);
        assert_eq!(config.output_range, Some((-10.0, 10.0)));
        assert_eq!(config.target_bounds, None);
    }

    #[test]
    fn test_args_negative_values() {
        let args = Args::parse_from(["regulactl", "--max-integral", "-5"]);
        let pid = args.config().build().unwrap();
        assert_eq!(pid.max_integral_output(), Some(5.0));

        let args = Args::parse_from(["regulactl", "--target-range", "-0.5"]);
        assert_eq!(args.target_range, Some(-0.5));
        assert!(matches!(
            args.config().validate(),
            Err(regula::Error::InvertedTargetRange(_, _))
        ));

        let args = Args::parse_from(["regulactl", "--filter", "-1"]);
        assert_eq!(
            args.config().validate(),
            Err(regula::Error::FilterGainOutOfRange(-1.0))
        );
    }
}
