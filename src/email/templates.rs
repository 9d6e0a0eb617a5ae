use crate::models::Charge;

pub fn render_password_reset(reset_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password recovery</h2>
    <p>A password reset was requested for your member account.</p>
    <p><a href="{reset_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Reset password</a></p>
    <p style="color: #666; font-size: 14px;">This link expires in 15 minutes. If you didn't request it, you can ignore this email.</p>
</body>
</html>"#
    )
}

pub fn render_membership_approved(name: &str, base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome aboard, {name}!</h2>
    <p>Your membership request was approved and your account is now active.</p>
    <p><a href="{base_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Go to the member area</a></p>
    <p style="color: #666; font-size: 14px;">All agreements and benefits are available to you from today.</p>
</body>
</html>"#
    )
}

pub fn render_charge_reminder(member_name: &str, charge: &Charge) -> String {
    let first_name = member_name.split(' ').next().unwrap_or(member_name);
    let due = charge.due_on.format("%d/%m/%Y");
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Payment reminder</h2>
    <p>Hi {first_name},</p>
    <p>A friendly reminder about your upcoming charge:</p>
    <ul>
        <li><strong>Description:</strong> {description}</li>
        <li><strong>Amount:</strong> R$ {amount}</li>
        <li><strong>Due date:</strong> {due}</li>
    </ul>
    <p>Details are available in your member area.</p>
</body>
</html>"#,
        description = charge.description,
        amount = charge.amount,
    )
}
