//! Printable documents served as downloadable byte buffers: payment
//! receipts and the adhesion contract a new member signs. Rendered as
//! self-contained HTML so the browser's print dialog does the
//! typesetting.

use chrono::Utc;

use crate::models::{Charge, Member, OrgProfile, Service};
use crate::pricing::PlanQuote;
use crate::signup::SignupForm;

const STYLE: &str = "font-family: Georgia, serif; max-width: 700px; margin: 0 auto; padding: 40px;";

fn page(title: &str, org_title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body style="{STYLE}">
    <h3 style="text-align: center;">{org_title}</h3>
    <h1 style="text-align: center;">{title}</h1>
    {body}
</body>
</html>"#
    )
}

/// Receipt for a PAID charge. The caller enforces the status gate.
pub fn render_receipt(charge: &Charge, member: &Member, org: &OrgProfile) -> Vec<u8> {
    let paid_on = charge
        .paid_on
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let issued = Utc::now().format("%d/%m/%Y");

    let body = format!(
        r#"<h4>Received from:</h4>
    <p>Name: {name}<br>Tax ID: {tax_id}</p>
    <h4>Referring to:</h4>
    <p>Service: {description}<br>Amount: R$ {amount}<br>Payment date: {paid_on}</p>
    <p style="text-align: center; margin-top: 60px;">Issued on: {issued}</p>
    <p style="text-align: center; margin-top: 40px;">______________________________________<br>
    Tax ID: {org_tax_id}</p>"#,
        name = member.name,
        tax_id = member.tax_id,
        description = charge.description,
        amount = charge.amount,
        org_tax_id = org.tax_id,
    );

    page("Payment Receipt", &org.site_title, &body).into_bytes()
}

/// Adhesion contract presented during signup, built from the wizard
/// snapshot before any member row exists.
pub fn render_adhesion_contract(
    form: &SignupForm,
    service: &Service,
    plan_quote: &PlanQuote,
    org: &OrgProfile,
) -> Vec<u8> {
    let today = Utc::now().format("%d/%m/%Y");
    let plan_name = plan_quote.plan.as_str();

    let dependents = if form.dependent_count > 0 {
        format!(
            r#"<p><strong>Dependents included: {count}</strong><br>Names: {names}</p>"#,
            count = form.dependent_count,
            names = form.dependent_names.join(", "),
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"<h4>CONTRACTED PARTY:</h4>
    <p>Legal name: {org_title}<br>Tax ID: {org_tax_id}<br>Address: {org_address}</p>
    <h4>CONTRACTING PARTY:</h4>
    <p>Name: {name}<br>Tax ID: {tax_id}<br>Email: {email}<br>
    Address: {street}, {number} - {district}, {city}/{state}</p>
    <h4>1. OBJECT</h4>
    <p style="text-align: justify;">This contract enrolls the CONTRACTING PARTY as a member of the
    CONTRACTED PARTY, granting the right to use the benefits, agreements and services offered,
    specifically the service '{service_name}', under the association's rules and bylaws.</p>
    <h4>2. SERVICE, PLAN AND AMOUNTS</h4>
    <p><strong>Contracted service: {service_name}</strong></p>
    <p style="text-align: justify;">Description: {service_description}</p>
    <p style="text-align: justify;">The CONTRACTING PARTY adheres to the '{plan_name}' payment plan,
    spanning {months} month(s). The total amount for the period is R$ {total}.
    Payment is due once the registration is approved.</p>
    {dependents}
    <p style="text-align: center;">Date: {today}</p>
    <p style="text-align: center; margin-top: 60px;">______________________________________<br>
    {name}<br>(CONTRACTING PARTY)</p>
    <p style="text-align: center; margin-top: 40px;">______________________________________<br>
    {org_title}<br>(CONTRACTED PARTY)</p>"#,
        org_title = org.site_title,
        org_tax_id = org.tax_id,
        org_address = org.address,
        name = form.name,
        tax_id = form.tax_id,
        email = form.email,
        street = form.street,
        number = form.number,
        district = form.district,
        city = form.city,
        state = form.state,
        service_name = service.name,
        service_description = service.description,
        months = plan_quote.months,
        total = plan_quote.total,
    );

    page("Member Adhesion Contract", &org.site_title, &body).into_bytes()
}
