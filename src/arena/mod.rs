//! Side-by-side comparison of one compiled prompt across two providers.
//!
//! Each slot owns its own result. The two calls run concurrently and neither
//! can overwrite the other's outcome.

use std::fmt;

use crate::errors::GatewayError;
use crate::model::{ApiKeys, NewRun, Prompt, RunOutput, RunOutputs};
use crate::provider::{Gateway, ProviderKind};
use crate::template::{self, Segment, Values};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "Model A"),
            Slot::B => write!(f, "Model B"),
        }
    }
}

#[derive(Debug)]
pub struct SlotState {
    pub provider: ProviderKind,
    pub output: Option<Result<String, GatewayError>>,
    pub rating: Option<u8>,
}

impl SlotState {
    fn new(provider: ProviderKind) -> Self {
        Self { provider, output: None, rating: None }
    }

    fn snapshot(&self) -> RunOutput {
        RunOutput {
            name: self.provider.display_name().to_string(),
            content: match &self.output {
                Some(Ok(text)) => text.clone(),
                _ => String::new(),
            },
            rating: self.rating,
        }
    }
}

pub struct Arena {
    prompt: Prompt,
    values: Values,
    a: SlotState,
    b: SlotState,
}

impl Arena {
    pub fn new(prompt: Prompt, model_a: ProviderKind, model_b: ProviderKind) -> Self {
        Self {
            prompt,
            values: Values::new(),
            a: SlotState::new(model_a),
            b: SlotState::new(model_b),
        }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// One entry per distinct placeholder name.
    pub fn inputs(&self) -> Vec<String> {
        template::unique_variables(&self.prompt.content)
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn compiled(&self) -> String {
        template::compile(&self.prompt.content, &self.values)
    }

    pub fn preview(&self) -> Vec<Segment> {
        template::render_preview(&self.prompt.content, &self.values)
    }

    pub fn slot(&self, slot: Slot) -> &SlotState {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }

    /// Switching provider discards that slot's previous output.
    pub fn set_provider(&mut self, slot: Slot, provider: ProviderKind) {
        let s = self.slot_mut(slot);
        if s.provider != provider {
            *s = SlotState::new(provider);
        }
    }

    pub fn set_rating(&mut self, slot: Slot, rating: u8) -> Result<(), String> {
        if !(1..=5).contains(&rating) {
            return Err(format!("rating must be between 1 and 5, got {rating}"));
        }
        self.slot_mut(slot).rating = Some(rating);
        Ok(())
    }

    /// Run one slot. Nothing is sent when the compiled prompt is empty.
    pub async fn run_slot(&mut self, slot: Slot, gateway: &Gateway, keys: &ApiKeys) {
        let prompt = self.compiled();
        if prompt.trim().is_empty() {
            return;
        }
        let provider = self.slot(slot).provider;
        let result = gateway.run(provider, keys.get(provider), &prompt).await;
        self.slot_mut(slot).output = Some(result);
    }

    /// Run both slots concurrently.
    pub async fn run_both(&mut self, gateway: &Gateway, keys: &ApiKeys) {
        let prompt = self.compiled();
        if prompt.trim().is_empty() {
            return;
        }
        let (pa, pb) = (self.a.provider, self.b.provider);
        let (ra, rb) = tokio::join!(
            gateway.run(pa, keys.get(pa), &prompt),
            gateway.run(pb, keys.get(pb), &prompt),
        );
        self.a.output = Some(ra);
        self.b.output = Some(rb);
    }

    /// Snapshot for the run history. Failed slots keep empty content.
    pub fn to_new_run(&self) -> NewRun {
        NewRun {
            prompt_id: self.prompt.id.clone(),
            prompt_title: self.prompt.title.clone(),
            variables: self.values.clone(),
            outputs: RunOutputs {
                model_a: self.a.snapshot(),
                model_b: self.b.snapshot(),
            },
        }
    }
}
