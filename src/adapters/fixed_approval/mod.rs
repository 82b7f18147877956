// Fixed approval adapter - Answers the checkpoint without an operator

use async_trait::async_trait;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Approval source returning a decision fixed at construction
#[derive(Debug, Clone)]
pub struct FixedApproval {
    approval: Approval,
}

impl FixedApproval {
    pub fn approve(untouched: UntouchedSet) -> Self {
        Self {
            approval: Approval::Approved(untouched),
        }
    }

    pub fn quit() -> Self {
        Self {
            approval: Approval::Quit,
        }
    }
}

#[async_trait]
impl ApprovalPort for FixedApproval {
    async fn await_approval(&self) -> Result<Approval, DomainError> {
        if let Approval::Approved(untouched) = &self.approval {
            info!("Using preset selection of {} untouched segments", untouched.len());
        }
        Ok(self.approval.clone())
    }
}
