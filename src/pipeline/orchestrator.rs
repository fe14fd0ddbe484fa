// All-jobs driver.

#[cfg(feature = "render")]
use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple comparison jobs, collecting results.
/// One job failure does NOT prevent other jobs from running.
#[cfg(feature = "render")]
pub fn run_all_jobs(jobs: &[JobConfig]) -> Vec<crate::error::Result<JobResult>> {
    jobs.iter().map(run_job).collect()
}
