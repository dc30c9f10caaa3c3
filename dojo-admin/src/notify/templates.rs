//! Notification message templates
//!
//! The verification workflow hands over structured data (name, link, batch);
//! everything presentation-shaped lives here.

/// A rendered outbound message
#[derive(Debug, Clone)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// Verification email for a new admission enquiry
pub fn admission_verification(first_name: &str, link: &str) -> Message {
    Message {
        subject: "Verify your email - Admission enquiry".to_string(),
        body: format!(
            "Hi {first_name},\n\n\
             Thank you for registering with the dojo! Please open the link \
             below to verify your email address and complete your enquiry:\n\n\
             {link}\n\n\
             This verification link expires in 24 hours. If you didn't \
             register, please ignore this email.\n"
        ),
    }
}

/// Verification email for a new student account
pub fn student_verification(first_name: &str, last_name: &str, batch: &str, link: &str) -> Message {
    Message {
        subject: "Verify your email - Student registration".to_string(),
        body: format!(
            "Hi {first_name} {last_name},\n\n\
             Thank you for registering as a student! Please open the link \
             below to verify your email address and activate your account:\n\n\
             {link}\n\n\
             Your login details:\n\
             - Email: this address\n\
             - Batch: {batch}\n\
             - Password: karate@{batch}\n\n\
             This verification link expires in 24 hours. If you didn't \
             register, please ignore this email.\n"
        ),
    }
}

/// Welcome email queued after an admission verifies for the first time
pub fn admission_welcome(first_name: &str) -> Message {
    Message {
        subject: "Welcome - registration complete!".to_string(),
        body: format!(
            "Welcome to the dojo, {first_name}!\n\n\
             Your email has been verified and your registration is complete. \
             Our team will contact you within 24-48 hours to schedule your \
             first trial class.\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_body_carries_the_link() {
        let message = admission_verification("Asha", "http://localhost/verify-email?token=t&email=e");
        assert!(message.body.contains("http://localhost/verify-email?token=t&email=e"));
        assert!(message.body.contains("Asha"));
    }

    #[test]
    fn student_body_names_the_batch_password() {
        let message = student_verification("Asha", "Rao", "batch2", "http://x/v");
        assert!(message.body.contains("karate@batch2"));
    }
}
