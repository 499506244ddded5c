// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activation;
pub mod auth;
pub mod bims;
pub mod blaise;
pub mod surveys;

pub use activation::ActivationEngine;
pub use auth::{AuthProvider, CredentialIssuer, MetadataTokenIssuer};
pub use bims::{BimsClient, StartDateLookup, StartDateResponse};
pub use blaise::{BlaiseClient, QuestionnaireSource};
pub use surveys::SurveyService;
