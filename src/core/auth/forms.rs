/// Number of digits in a verification code.
pub const OTP_LENGTH: usize = 4;

/// Seconds before a new code may be requested.
pub const RESEND_COUNTDOWN_SECS: u32 = 60;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneForm {
    pub phone: String,
}

/// Four single-digit slots plus the resend countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpForm {
    digits: [Option<char>; OTP_LENGTH],
    remaining_secs: u32,
}

impl Default for OtpForm {
    fn default() -> Self {
        Self {
            digits: [None; OTP_LENGTH],
            remaining_secs: RESEND_COUNTDOWN_SECS,
        }
    }
}

impl OtpForm {
    /// Applies raw text typed or pasted into slot `index`. The slot's own
    /// digit is dropped from `value` first; the remaining digits fill the
    /// slot and those after it, and digits past the last slot are ignored.
    /// Anything but ASCII digits is rejected.
    pub fn input(&mut self, index: usize, value: &str) -> bool {
        if index >= OTP_LENGTH {
            return false;
        }
        let typed = match self.digits[index] {
            Some(old) if value.chars().count() > 1 => value
                .strip_prefix(old)
                .or_else(|| value.strip_suffix(old))
                .unwrap_or(value),
            _ => value,
        };
        if typed.is_empty() {
            self.digits[index] = None;
            return true;
        }
        if !typed.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        for (slot, c) in self.digits[index..].iter_mut().zip(typed.chars()) {
            *slot = Some(c);
        }
        true
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    /// The entered code; shorter than [`OTP_LENGTH`] while slots are empty.
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn can_resend(&self) -> bool {
        self.remaining_secs == 0
    }

    /// One second of countdown.
    pub fn tick(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPasswordForm {
    pub new_password: String,
    pub confirm_password: String,
    pub show_new_password: bool,
    pub show_confirm_password: bool,
}

/// `+91 ` followed by the first four characters and a masked remainder.
pub fn mask_phone(phone: &str) -> String {
    if phone.is_empty() {
        return "your mobile number".to_string();
    }
    let head: String = phone.chars().take(4).collect();
    format!("+91 {head}****")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_all_but_the_first_four_digits() {
        assert_eq!(mask_phone("9998887776"), "+91 9998****");
        assert_eq!(mask_phone("12"), "+91 12****");
        assert_eq!(mask_phone(""), "your mobile number");
    }

    #[test]
    fn otp_slots_only_take_digits() {
        let mut form = OtpForm::default();
        assert!(form.input(0, "1"));
        assert!(!form.input(1, "a"));
        assert!(!form.input(1, "2-3"));
        assert!(!form.input(4, "5"));
        assert_eq!(form.code(), "1");
        assert!(form.input(0, ""));
        assert_eq!(form.code(), "");
    }

    #[test]
    fn typing_over_a_filled_slot_keeps_the_new_digit() {
        let mut form = OtpForm::default();
        assert!(form.input(0, "1"));
        assert!(form.input(0, "17"));
        assert_eq!(form.code(), "7");
        assert!(form.input(0, "37"));
        assert_eq!(form.code(), "3");
        assert!(!form.input(0, "3a"));
        assert_eq!(form.code(), "3");
    }

    #[test]
    fn pasted_code_spreads_across_slots() {
        let mut form = OtpForm::default();
        assert!(form.input(1, "987654"));
        assert_eq!(form.digit(0), None);
        assert_eq!(form.code(), "987");

        assert!(form.input(0, "1234"));
        assert_eq!(form.code(), "1234");
    }

    #[test]
    fn countdown_stops_at_zero() {
        let mut form = OtpForm::default();
        for _ in 0..RESEND_COUNTDOWN_SECS - 1 {
            form.tick();
        }
        assert!(!form.can_resend());
        form.tick();
        form.tick();
        assert!(form.can_resend());
        assert_eq!(form.remaining_secs(), 0);
    }
}
