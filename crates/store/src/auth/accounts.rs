//! Fixed directory of demo accounts.
//!
//! Credentials are compared and stored as plain values; the whole auth
//! subsystem is a mock and is documented as such. Profile data mirrors
//! the seed accounts shipped with the storefront.

use mombabyshop_core::{
    Address, AddressId, Email, ProfileId, UserPreferences, UserProfile, UserRole,
};

/// The one password every demo account accepts.
pub const DEMO_PASSWORD: &str = "123456";

/// Legacy account honored for any requested role, normalized to customer.
pub const LEGACY_EMAIL: &str = "test@example.com";

/// Login email of the demo account for `role`.
#[must_use]
pub const fn demo_email(role: UserRole) -> &'static str {
    match role {
        UserRole::Customer => "customer@example.com",
        UserRole::Seller => "seller@example.com",
        UserRole::Admin => "admin@example.com",
    }
}

/// Check credentials against the directory and return the matching
/// profile, or `None` for anything else.
#[must_use]
pub fn authenticate(email: &str, password: &str, role: UserRole) -> Option<UserProfile> {
    if password != DEMO_PASSWORD {
        return None;
    }

    if email == LEGACY_EMAIL {
        return Some(legacy_profile());
    }

    (email == demo_email(role)).then(|| demo_profile(role))
}

/// Seed profile for the demo account of `role`.
#[must_use]
pub fn demo_profile(role: UserRole) -> UserProfile {
    match role {
        UserRole::Customer => customer_profile(),
        UserRole::Seller => seller_profile(),
        UserRole::Admin => admin_profile(),
    }
}

/// The legacy test account: the customer seed profile under the legacy
/// email.
#[must_use]
pub fn legacy_profile() -> UserProfile {
    let mut profile = customer_profile();
    profile.email = demo_account_email(LEGACY_EMAIL);
    profile.name = "Nguyễn Văn Test".to_owned();
    profile
}

// Directory emails are compile-time constants and always parse.
fn demo_account_email(email: &str) -> Email {
    Email::parse(email).unwrap_or_else(|_| unreachable!("demo email is valid"))
}

fn customer_profile() -> UserProfile {
    UserProfile {
        id: ProfileId::new(1),
        email: demo_account_email("customer@example.com"),
        name: "Nguyễn Văn Khách".to_owned(),
        role: UserRole::Customer,
        phone: Some("0123456789".to_owned()),
        avatar: Some("/default-avatar.png".to_owned()),
        addresses: vec![Address {
            id: AddressId::new(1),
            name: "Actor Khách Hàng".to_owned(),
            phone: "0123456789".to_owned(),
            address: "123 Đường ABC".to_owned(),
            city: "Hồ Chí Minh".to_owned(),
            district: "Quận 1".to_owned(),
            ward: "Phường Bến Nghé".to_owned(),
            is_default: true,
        }],
        preferences: Some(UserPreferences {
            newsletter: true,
            promotions: true,
            order_updates: true,
            language: "vi".to_owned(),
            currency: "VND".to_owned(),
        }),
    }
}

fn seller_profile() -> UserProfile {
    UserProfile {
        id: ProfileId::new(2),
        email: demo_account_email("seller@example.com"),
        name: "Actor Bán Hàng".to_owned(),
        role: UserRole::Seller,
        phone: Some("0987654321".to_owned()),
        avatar: Some("/seller-avatar.png".to_owned()),
        addresses: vec![Address {
            id: AddressId::new(2),
            name: "Cửa hàng ABC".to_owned(),
            phone: "0987654321".to_owned(),
            address: "456 Đường XYZ".to_owned(),
            city: "Hà Nội".to_owned(),
            district: "Quận Ba Đình".to_owned(),
            ward: "Phường Cống Vị".to_owned(),
            is_default: true,
        }],
        preferences: Some(UserPreferences {
            newsletter: true,
            promotions: false,
            order_updates: true,
            language: "vi".to_owned(),
            currency: "VND".to_owned(),
        }),
    }
}

fn admin_profile() -> UserProfile {
    UserProfile {
        id: ProfileId::new(3),
        email: demo_account_email("admin@example.com"),
        name: "Actor Quản Trị".to_owned(),
        role: UserRole::Admin,
        phone: Some("0555666777".to_owned()),
        avatar: Some("/admin-avatar.png".to_owned()),
        addresses: vec![Address {
            id: AddressId::new(3),
            name: "Văn phòng MomBabyShop".to_owned(),
            phone: "0555666777".to_owned(),
            address: "789 Đường Admin".to_owned(),
            city: "Đà Nẵng".to_owned(),
            district: "Quận Hải Châu".to_owned(),
            ward: "Phường Thạch Thang".to_owned(),
            is_default: true,
        }],
        preferences: Some(UserPreferences {
            newsletter: false,
            promotions: false,
            order_updates: true,
            language: "vi".to_owned(),
            currency: "VND".to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_role_authenticates() {
        for role in [UserRole::Customer, UserRole::Seller, UserRole::Admin] {
            let profile = authenticate(demo_email(role), DEMO_PASSWORD, role)
                .expect("demo account must authenticate");
            assert_eq!(profile.role, role);
        }
    }

    #[test]
    fn test_wrong_password_fails() {
        assert!(authenticate("admin@example.com", "wrongpass", UserRole::Admin).is_none());
    }

    #[test]
    fn test_role_mismatch_fails() {
        assert!(authenticate("admin@example.com", DEMO_PASSWORD, UserRole::Customer).is_none());
    }

    #[test]
    fn test_legacy_account_normalizes_to_customer() {
        for role in [UserRole::Customer, UserRole::Seller, UserRole::Admin] {
            let profile = authenticate(LEGACY_EMAIL, DEMO_PASSWORD, role)
                .expect("legacy account accepts any role");
            assert_eq!(profile.role, UserRole::Customer);
            assert_eq!(profile.email.as_str(), LEGACY_EMAIL);
            assert_eq!(profile.name, "Nguyễn Văn Test");
        }
    }
}
