use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use axum::Json;

use crate::forms::{
    ContactForm, DonationForm, DonationType, FormState, NewsletterSignup, Validate,
    VolunteerApplication,
};
use crate::utils::response::confirmed;
use crate::utils::{AppError, AppResult};

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(values)| values)
        .map_err(|e| AppError::ValidationError(e.body_text()))
}

/// Runs the form's submit step. Nothing leaves the process either way.
fn submit<F: Validate>(name: &'static str, values: F) -> AppResult<FormState<F>> {
    let mut state = FormState::new(values);
    if state.submit() {
        tracing::info!(form = name, "Form submitted");
        Ok(state)
    } else {
        Err(AppError::FormRejected(state.errors))
    }
}

pub async fn contact(body: Result<Json<ContactForm>, JsonRejection>) -> AppResult<Response> {
    let state = submit("contact", parse_body(body)?)?;
    Ok(confirmed(
        "contact",
        format!(
            "Thanks {}, we'll get back to you within two business days.",
            state.values.first_name.trim()
        ),
    ))
}

pub async fn volunteer(
    body: Result<Json<VolunteerApplication>, JsonRejection>,
) -> AppResult<Response> {
    let state = submit("volunteer", parse_body(body)?)?;
    Ok(confirmed(
        "volunteer",
        format!(
            "Thank you for applying, {}! Our volunteer coordinator will reach out to schedule a quick chat.",
            state.values.first_name.trim()
        ),
    ))
}

pub async fn donate(body: Result<Json<DonationForm>, JsonRejection>) -> AppResult<Response> {
    let state = submit("donation", parse_body(body)?)?;
    let amount = state
        .values
        .resolved_amount()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let kind = match state.values.donation_type {
        DonationType::OneTime => "gift",
        DonationType::Monthly => "monthly gift",
    };
    Ok(confirmed(
        "donation",
        format!("Thank you for your {} of ${:.2}. No payment has been taken.", kind, amount),
    ))
}

pub async fn newsletter(
    body: Result<Json<NewsletterSignup>, JsonRejection>,
) -> AppResult<Response> {
    submit("newsletter", parse_body(body)?)?;
    Ok(confirmed("newsletter", "Thank you for subscribing to our newsletter!"))
}
