//! Code ranges

use super::codes::ErrorCode;

/// 按千位划分的错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    /// Menu, role and account administration
    Admin,
    /// Logged server-side when returned
    System,
}

impl From<u16> for ErrorCategory {
    fn from(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            9 => Self::System,
            _ => Self::Admin,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(ErrorCategory::from(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from(1005), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from(2002), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from(6101), ErrorCategory::Admin);
        assert_eq!(ErrorCategory::from(9002), ErrorCategory::System);

        assert_eq!(ErrorCode::NoAccessibleMenu.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::UsernameExists.category(), ErrorCategory::Admin);
    }
}
