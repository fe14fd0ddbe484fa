#[cfg(feature = "render")]
fn main() -> std::process::ExitCode {
    cli::run()
}

#[cfg(not(feature = "render"))]
fn main() -> std::process::ExitCode {
    eprintln!("pdf_diff was built without the `render` feature; the CLI requires it");
    std::process::ExitCode::FAILURE
}

#[cfg(feature = "render")]
mod cli {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use pdf_diff::config::job::JobFile;
    use pdf_diff::config::merged::MergedConfig;
    use pdf_diff::config::{self};
    use pdf_diff::pipeline::job_runner::JobConfig;
    use pdf_diff::pipeline::orchestrator::run_all_jobs;

    pub fn run() -> ExitCode {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();

        let args: Vec<String> = std::env::args().skip(1).collect();

        if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
            eprintln!("Usage: pdf_diff <jobs.yaml>...");
            eprintln!("  Compare PDF document pairs according to job specifications.");
            return if args.is_empty() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }

        if args.iter().any(|a| a == "--version" || a == "-V") {
            eprintln!("pdf_diff {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }

        // Collect job configs from all job files.
        let mut job_configs: Vec<JobConfig> = Vec::new();

        for job_file_arg in &args {
            let job_file_path = Path::new(job_file_arg);

            // Load settings from the same directory as the job file.
            let settings = match config::load_settings_for_job(job_file_path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                    return ExitCode::FAILURE;
                }
            };

            // Read and parse the job YAML file.
            let yaml_content = match std::fs::read_to_string(job_file_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("ERROR: Failed to read job file {job_file_arg}: {e}");
                    return ExitCode::FAILURE;
                }
            };

            let job_file: JobFile = match serde_yml::from_str(&yaml_content) {
                Ok(jf) => jf,
                Err(e) => {
                    eprintln!("ERROR: Failed to parse job file {job_file_arg}: {e}");
                    return ExitCode::FAILURE;
                }
            };

            // Resolve job file directory for relative paths.
            let job_dir = job_file_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();

            // Merge settings with each job and construct JobConfig.
            for job in &job_file.jobs {
                let merged = MergedConfig::new(&settings, job);
                let options = merged.compare_options();

                // Reject invalid options before any PDF is opened.
                if let Err(e) = options.validate() {
                    eprintln!("ERROR: {e}");
                    return ExitCode::FAILURE;
                }

                job_configs.push(JobConfig {
                    input_a: resolve_path(&job_dir, &job.a),
                    input_b: resolve_path(&job_dir, &job.b),
                    report_path: resolve_path(&job_dir, &job.report),
                    scale: merged.scale,
                    highlight_opacity: merged.highlight_opacity,
                    options,
                });
            }
        }

        // Run all jobs through the pipeline.
        let results = run_all_jobs(&job_configs);

        // Report results.
        let mut has_error = false;
        for (i, result) in results.iter().enumerate() {
            match result {
                Ok(job_result) => {
                    eprintln!(
                        "OK: {} vs {} -> {} ({} pages, {} diff pixels)",
                        job_result.input_a.display(),
                        job_result.input_b.display(),
                        job_result.report_path.display(),
                        job_result.pages_compared,
                        job_result.total_diff_pixels
                    );
                }
                Err(e) => {
                    eprintln!(
                        "ERROR: {} vs {}: {e}",
                        job_configs[i].input_a.display(),
                        job_configs[i].input_b.display()
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    /// Resolve a potentially relative path against a base directory.
    /// If the path is already absolute, return it as-is.
    fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    }
}
