use super::sendmail::send_email;
use crate::config::Config;

const PARCEL_CREATED_TEMPLATE: &str = r#"
<p>Dear {{owner_name}},</p>
<p>Your parcel with LR Number <strong>{{lr_number}}</strong> has been successfully registered.</p>
<p>Current status: <strong>{{status}}</strong></p>
<p>We will notify you when there are updates.</p>
<p>Best regards,<br/>The Land Registry Team</p>
"#;

const SURVEYOR_ASSIGNED_TEMPLATE: &str = r#"
<p>Dear {{owner_name}},</p>
<p>Your parcel <strong>{{lr_number}}</strong> has been assigned to surveyor <strong>{{surveyor_name}}</strong>.</p>
<p>The surveyor will contact you soon to schedule a visit.</p>
<p>Best regards,<br/>The Land Registry Team</p>
"#;

pub async fn send_parcel_created_email(
    config: &Config,
    to_email: &str,
    owner_name: &str,
    lr_number: &str,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!("Parcel Created: {}", lr_number);
    let placeholders = vec![
        ("{{owner_name}}".to_string(), owner_name.to_string()),
        ("{{lr_number}}".to_string(), lr_number.to_string()),
        ("{{status}}".to_string(), status.to_string()),
    ];

    send_email(config, to_email, &subject, PARCEL_CREATED_TEMPLATE, &placeholders).await
}

pub async fn send_surveyor_assigned_email(
    config: &Config,
    to_email: &str,
    owner_name: &str,
    lr_number: &str,
    surveyor_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!("Surveyor Assigned to Your Parcel {}", lr_number);
    let placeholders = vec![
        ("{{owner_name}}".to_string(), owner_name.to_string()),
        ("{{lr_number}}".to_string(), lr_number.to_string()),
        ("{{surveyor_name}}".to_string(), surveyor_name.to_string()),
    ];

    send_email(
        config,
        to_email,
        &subject,
        SURVEYOR_ASSIGNED_TEMPLATE,
        &placeholders,
    )
    .await
}
