use crate::args::{PositiveU64, TesterArgs};
use crate::http::OutboundRequest;

pub(crate) struct RunPlan {
    pub(crate) args: TesterArgs,
    pub(crate) request: OutboundRequest,
    pub(crate) volume: Volume,
}

pub(crate) enum Volume {
    Load(u64),
    Stress(PositiveU64),
}
