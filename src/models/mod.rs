// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod questionnaire;
pub mod survey;

pub use questionnaire::{EnrichedQuestionnaire, Questionnaire};
pub use survey::{group_by_survey, Survey};
