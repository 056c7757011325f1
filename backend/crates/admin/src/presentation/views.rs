//! HTML Views
//!
//! Minimal hand-assembled markup. Every interpolated value goes through
//! [`escape`].

use std::collections::HashMap;
use std::fmt::Write;

use account::{User, UserRole};
use axum::http::StatusCode;
use axum::response::Html;
use campaign::Campaign;
use chrono::{DateTime, Utc};
use funding::application::TransactionView;
use kernel::id::UserId;

use crate::presentation::forms::{CampaignForm, LoginForm, UserForm};

/// Escape text for HTML element content and quoted attributes
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn layout(title: &str, admin: Option<&User>, body: &str) -> Html<String> {
    let nav = match admin {
        Some(admin) => format!(
            r#"<nav>
  <a href="/users">Users</a>
  <a href="/campaigns">Campaigns</a>
  <a href="/transactions">Transactions</a>
  <span class="who">{}</span>
  <a href="/logout">Logout</a>
</nav>"#,
            escape(&admin.name)
        ),
        None => String::new(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Admin</title>
<link rel="stylesheet" href="/css/admin.css">
</head>
<body>
{nav}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<ul class="errors">"#);
    for error in errors {
        let _ = write!(out, "<li>{}</li>", escape(error));
    }
    out.push_str("</ul>");
    out
}

fn text_input(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{value}"></label>"#,
        label = escape(label),
        value = escape(value),
    )
}

fn textarea(label: &str, name: &str, value: &str) -> String {
    format!(
        r#"<label>{label} <textarea name="{name}">{value}</textarea></label>"#,
        label = escape(label),
        value = escape(value),
    )
}

fn image(path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => {
            format!(r#"<img src="/{}" alt="" width="64">"#, escape(path))
        }
        _ => "-".to_string(),
    }
}

fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    layout(
        &format!("Error {}", status.as_u16()),
        None,
        &format!(
            r#"<p>{}</p><p><a href="/users">Back</a></p>"#,
            escape(message)
        ),
    )
}

// ============================================================================
// Session
// ============================================================================

pub fn login_page(form: &LoginForm, errors: &[String]) -> Html<String> {
    let body = format!(
        r#"{errors}
<form method="post" action="/session">
  <label>Email <input type="email" name="email" value="{email}"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Sign in</button>
</form>"#,
        errors = error_list(errors),
        email = escape(&form.email),
    );
    layout("Sign in", None, &body)
}

// ============================================================================
// Users
// ============================================================================

pub fn users_index(admin: &User, users: &[User]) -> Html<String> {
    let mut rows = String::new();
    for user in users {
        let _ = write!(
            rows,
            r#"<tr>
  <td>{id}</td><td>{avatar}</td><td>{name}</td><td>{occupation}</td><td>{email}</td><td>{role}</td>
  <td><a href="/users/edit/{id}">Edit</a> <a href="/users/avatar/{id}">Avatar</a></td>
</tr>"#,
            id = user.id,
            avatar = image(user.avatar_file_name.as_deref()),
            name = escape(&user.name),
            occupation = escape(&user.occupation),
            email = escape(user.email.as_str()),
            role = user.role,
        );
    }

    let body = format!(
        r#"<p><a href="/users/new">New user</a></p>
<table>
<thead><tr><th>ID</th><th>Avatar</th><th>Name</th><th>Occupation</th><th>Email</th><th>Role</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    );
    layout("Users", Some(admin), &body)
}

fn role_select(selected: &str) -> String {
    let selected = UserRole::from_code(selected).unwrap_or_default();
    let mut out = String::from(r#"<label>Role <select name="role">"#);
    for role in UserRole::ALL {
        let _ = write!(
            out,
            r#"<option value="{code}"{sel}>{code}</option>"#,
            code = role.code(),
            sel = if role == selected { " selected" } else { "" },
        );
    }
    out.push_str("</select></label>");
    out
}

pub fn user_new_page(admin: &User, form: &UserForm, errors: &[String]) -> Html<String> {
    let body = format!(
        r#"{errors}
<form method="post" action="/users">
  {name}
  {occupation}
  <label>Email <input type="email" name="email" value="{email}"></label>
  <label>Password <input type="password" name="password"></label>
  {role}
  <button type="submit">Create</button>
</form>"#,
        errors = error_list(errors),
        name = text_input("Name", "name", &form.name),
        occupation = text_input("Occupation", "occupation", &form.occupation),
        email = escape(&form.email),
        role = role_select(&form.role),
    );
    layout("New user", Some(admin), &body)
}

pub fn user_edit_page(
    admin: &User,
    id: UserId,
    form: &UserForm,
    errors: &[String],
) -> Html<String> {
    let body = format!(
        r#"{errors}
<form method="post" action="/users/update/{id}">
  {name}
  {occupation}
  <label>Email <input type="email" name="email" value="{email}"></label>
  {role}
  <button type="submit">Save</button>
</form>"#,
        errors = error_list(errors),
        name = text_input("Name", "name", &form.name),
        occupation = text_input("Occupation", "occupation", &form.occupation),
        email = escape(&form.email),
        role = role_select(&form.role),
    );
    layout("Edit user", Some(admin), &body)
}

pub fn avatar_page(admin: &User, user: &User, errors: &[String]) -> Html<String> {
    let body = format!(
        r#"{errors}
<p>{name} {current}</p>
<form method="post" action="/users/avatar/{id}" enctype="multipart/form-data">
  <input type="file" name="avatar">
  <button type="submit">Upload</button>
</form>"#,
        errors = error_list(errors),
        name = escape(&user.name),
        current = image(user.avatar_file_name.as_deref()),
        id = user.id,
    );
    layout("Upload avatar", Some(admin), &body)
}

// ============================================================================
// Campaigns
// ============================================================================

pub fn campaigns_index(
    admin: &User,
    campaigns: &[Campaign],
    owners: &HashMap<UserId, User>,
) -> Html<String> {
    let mut rows = String::new();
    for campaign in campaigns {
        let owner = owners
            .get(&campaign.user_id)
            .map(|u| escape(&u.name))
            .unwrap_or_default();
        let _ = write!(
            rows,
            r#"<tr>
  <td>{id}</td><td>{image}</td><td>{name}</td><td>{owner}</td><td>{current} / {goal}</td><td>{backers}</td>
  <td><a href="/campaigns/show/{id}">Show</a> <a href="/campaigns/edit/{id}">Edit</a> <a href="/campaigns/image/{id}">Image</a></td>
</tr>"#,
            id = campaign.id,
            image = image(campaign.primary_image().map(|i| i.file_name.as_str())),
            name = escape(&campaign.name),
            current = campaign.current_amount,
            goal = campaign.goal_amount,
            backers = campaign.backer_count,
        );
    }

    let body = format!(
        r#"<p><a href="/campaigns/new">New campaign</a></p>
<table>
<thead><tr><th>ID</th><th>Image</th><th>Name</th><th>Owner</th><th>Raised</th><th>Backers</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    );
    layout("Campaigns", Some(admin), &body)
}

fn campaign_fields(form: &CampaignForm) -> String {
    [
        text_input("Name", "name", &form.name),
        text_input("Short description", "short_description", &form.short_description),
        textarea("Description", "description", &form.description),
        text_input("Goal amount", "goal_amount", &form.goal_amount),
        text_input("Perks (comma separated)", "perks", &form.perks),
    ]
    .join("\n  ")
}

pub fn campaign_new_page(
    admin: &User,
    users: &[User],
    form: &CampaignForm,
    errors: &[String],
) -> Html<String> {
    let mut options = String::new();
    for user in users {
        let _ = write!(
            options,
            r#"<option value="{id}"{sel}>{name} ({email})</option>"#,
            id = user.id,
            sel = if form.user_id.trim() == user.id.to_string() { " selected" } else { "" },
            name = escape(&user.name),
            email = escape(user.email.as_str()),
        );
    }

    let body = format!(
        r#"{errors}
<form method="post" action="/campaigns">
  <label>Owner <select name="user_id">{options}</select></label>
  {fields}
  <button type="submit">Create</button>
</form>"#,
        errors = error_list(errors),
        fields = campaign_fields(form),
    );
    layout("New campaign", Some(admin), &body)
}

pub fn campaign_edit_page(
    admin: &User,
    id: i64,
    form: &CampaignForm,
    errors: &[String],
) -> Html<String> {
    let body = format!(
        r#"{errors}
<form method="post" action="/campaigns/update/{id}">
  {fields}
  <button type="submit">Save</button>
</form>"#,
        errors = error_list(errors),
        fields = campaign_fields(form),
    );
    layout("Edit campaign", Some(admin), &body)
}

pub fn campaign_image_page(admin: &User, campaign: &Campaign, errors: &[String]) -> Html<String> {
    let body = format!(
        r#"{errors}
<p>{name}</p>
<form method="post" action="/campaigns/image/{id}" enctype="multipart/form-data">
  <input type="file" name="file">
  <label><input type="checkbox" name="is_primary" value="true"> Primary</label>
  <button type="submit">Upload</button>
</form>"#,
        errors = error_list(errors),
        name = escape(&campaign.name),
        id = campaign.id,
    );
    layout("Upload campaign image", Some(admin), &body)
}

pub fn campaign_show_page(
    admin: &User,
    campaign: &Campaign,
    owner: Option<&User>,
    transactions: &[TransactionView],
) -> Html<String> {
    let mut images = String::new();
    for img in &campaign.images {
        let _ = write!(
            images,
            "<li>{}{}</li>",
            image(Some(&img.file_name)),
            if img.is_primary { " (primary)" } else { "" }
        );
    }

    let mut perks = String::new();
    for perk in campaign.perk_list() {
        let _ = write!(perks, "<li>{}</li>", escape(&perk));
    }

    let body = format!(
        r#"<dl>
  <dt>Owner</dt><dd>{owner}</dd>
  <dt>Slug</dt><dd>{slug}</dd>
  <dt>Short description</dt><dd>{short}</dd>
  <dt>Description</dt><dd>{description}</dd>
  <dt>Raised</dt><dd>{current} / {goal}</dd>
  <dt>Backers</dt><dd>{backers}</dd>
</dl>
<h2>Perks</h2><ul>{perks}</ul>
<h2>Images</h2><ul>{images}</ul>
<h2>Transactions</h2>
{transactions}"#,
        owner = owner.map(|u| escape(&u.name)).unwrap_or_default(),
        slug = escape(&campaign.slug),
        short = escape(&campaign.short_description),
        description = escape(&campaign.description),
        current = campaign.current_amount,
        goal = campaign.goal_amount,
        backers = campaign.backer_count,
        transactions = transactions_table(transactions),
    );
    layout(&campaign.name, Some(admin), &body)
}

// ============================================================================
// Transactions
// ============================================================================

fn transactions_table(views: &[TransactionView]) -> String {
    let mut rows = String::new();
    for view in views {
        let t = &view.transaction;
        let _ = write!(
            rows,
            r#"<tr><td>{id}</td><td>{code}</td><td>{campaign}</td><td>{user}</td><td>{amount}</td><td>{status}</td><td>{at}</td></tr>"#,
            id = t.id,
            code = escape(&t.code),
            campaign = view
                .campaign
                .as_ref()
                .map(|c| escape(&c.name))
                .unwrap_or_default(),
            user = view
                .user
                .as_ref()
                .map(|u| escape(&u.name))
                .unwrap_or_default(),
            amount = t.amount,
            status = t.status,
            at = date(&t.created_at),
        );
    }

    format!(
        r#"<table>
<thead><tr><th>ID</th><th>Order</th><th>Campaign</th><th>Backer</th><th>Amount</th><th>Status</th><th>Date</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    )
}

pub fn transactions_index(admin: &User, views: &[TransactionView]) -> Html<String> {
    layout("Transactions", Some(admin), &transactions_table(views))
}
