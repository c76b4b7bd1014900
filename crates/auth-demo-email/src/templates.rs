//! HTML bodies for the transactional emails.
//!
//! Every interpolated value goes through [`escape_html`].

/// Inputs for the reset-password email.
#[derive(Debug, Clone)]
pub struct ResetPasswordEmail<'a> {
    pub username: &'a str,
    pub reset_link: &'a str,
}

/// Inputs for the organization invitation email.
#[derive(Debug, Clone)]
pub struct InvitationEmail<'a> {
    pub username: &'a str,
    pub invited_by_username: &'a str,
    pub invited_by_email: &'a str,
    pub team_name: &'a str,
    pub invite_link: &'a str,
}

pub fn verification_email(url: &str) -> String {
    format!(r#"<a href="{}">Verify your email address</a>"#, escape_html(url))
}

pub fn two_factor_otp(otp: &str) -> String {
    format!("Your OTP is {}", escape_html(otp))
}

pub fn reset_password_email(email: &ResetPasswordEmail<'_>) -> String {
    let username = escape_html(email.username);
    let link = escape_html(email.reset_link);
    layout(
        "Reset your Better Auth password",
        &format!(
            r#"<h1 style="{HEADING}">Reset your password</h1>
<p style="{TEXT}">Hi {username},</p>
<p style="{TEXT}">Someone recently requested a password change for your Better Auth account. If this was you, you can set a new password here:</p>
<p><a href="{link}" style="{BUTTON}">Reset password</a></p>
<p style="{TEXT}">If you don't want to change your password or didn't request this, just ignore and delete this message.</p>
<p style="{TEXT}">To keep your account secure, please don't forward this email to anyone.</p>"#
        ),
    )
}

pub fn invitation_email(email: &InvitationEmail<'_>) -> String {
    let username = escape_html(email.username);
    let inviter = escape_html(email.invited_by_username);
    let inviter_email = escape_html(email.invited_by_email);
    let team = escape_html(email.team_name);
    let link = escape_html(email.invite_link);
    layout(
        &format!("Join {team} on Better Auth"),
        &format!(
            r#"<h1 style="{HEADING}">Join <strong>{team}</strong> on <strong>Better Auth.</strong></h1>
<p style="{TEXT}">Hello there,</p>
<p style="{TEXT}"><strong>{inviter}</strong> (<a href="mailto:{inviter_email}">{inviter_email}</a>) has invited you to the <strong>{team}</strong> team on <strong>Better Auth</strong>.</p>
<p><a href="{link}" style="{BUTTON}">Join the team</a></p>
<p style="{TEXT}">or copy and paste this URL into your browser: <a href="{link}">{link}</a></p>
<hr />
<p style="{MUTED}">This invitation was intended for <span>{username}</span>. If you were not expecting this invitation, you can ignore this email.</p>"#
        ),
    )
}

const HEADING: &str = "font-size:24px;font-weight:normal;color:#000;margin:30px 0";
const TEXT: &str = "font-size:14px;line-height:24px;color:#000";
const MUTED: &str = "font-size:12px;line-height:24px;color:#666";
const BUTTON: &str = "display:inline-block;background:#000;color:#fff;border-radius:4px;padding:12px 20px;font-size:12px;font-weight:600;text-decoration:none";

fn layout(preview: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8" /><meta name="viewport" content="width=device-width, initial-scale=1" /></head>
<body style="background:#fff;margin:auto;font-family:sans-serif;padding:0 8px">
<div style="display:none;max-height:0;overflow:hidden">{preview}</div>
<div style="border:1px solid #eaeaea;border-radius:4px;margin:40px auto;padding:20px;max-width:465px">
{content}
</div>
</body>
</html>"#
    )
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
