use std::sync::Arc;

use tracing::debug;

use crate::args::OutputFormat;
use crate::engine::{Behavior, EngineOptions, LoadEngine, Reporting, StatsScope, Target};
use crate::error::AppResult;
use crate::http::ReqwestTransport;

use super::types::{RunPlan, Volume};

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let RunPlan {
        args,
        request,
        volume,
    } = plan;

    let transport = ReqwestTransport::from_args(&args)?;
    let options = EngineOptions {
        stats_scope: StatsScope::Session,
        error_rate_basis: args.error_rate_basis,
        reporting: match args.output_format {
            OutputFormat::Text => Reporting::Stdout,
            OutputFormat::Json => Reporting::Silent,
        },
    };
    let target = Target::from_request(request, args.qps.get());
    debug!(
        "Target {} at {} qps ({:?})",
        target.url(),
        target.qps(),
        args.method
    );
    let mut engine = LoadEngine::new(target, transport, options)?;

    // The CLI has no way to express hooks; library callers pass their own.
    let behaviors: Vec<Arc<dyn Behavior>> = Vec::new();
    let report = match volume {
        Volume::Load(total) => engine.run_load_test(total, &behaviors).await?,
        Volume::Stress(max) => engine.run_stress_test(max, &behaviors).await?,
    };

    if args.output_format == OutputFormat::Json {
        println!("{}", report.to_json()?);
    }
    Ok(())
}
