use clap::ArgMatches;

use crate::args::{PositiveU64, TestType, TesterArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, EngineError};
use crate::http::build_request;

use super::types::{RunPlan, Volume};

pub(crate) fn build_plan(mut args: TesterArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let request = build_request(&args)?;
    let volume = match args.test_type {
        TestType::Load => Volume::Load(args.num_requests),
        TestType::Stress => {
            let max = PositiveU64::try_from(args.num_requests).map_err(|_err| {
                AppError::engine(EngineError::invalid(
                    "stress test needs --num-requests >= 1",
                ))
            })?;
            Volume::Stress(max)
        }
    };

    Ok(RunPlan {
        args,
        request,
        volume,
    })
}
