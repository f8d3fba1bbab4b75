//! `ActorEntity` implementation for [`User`].

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::model::{Role, User, UserCreate, UserFilter, UserId, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Filter = UserFilter;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let email = params.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::Validation("a valid email is required".into()));
        }
        if params.password_hash.is_empty() {
            return Err(UserError::Validation("password is required".into()));
        }
        if params.name.trim().is_empty() {
            return Err(UserError::Validation("name is required".into()));
        }
        if params.phone.trim().is_empty() {
            return Err(UserError::Validation("phone number is required".into()));
        }
        if params.role == Role::Restaurant
            && params
                .business_name
                .as_deref()
                .map_or(true, |n| n.trim().is_empty())
        {
            return Err(UserError::Validation(
                "business name is required for restaurant accounts".into(),
            ));
        }

        Ok(Self {
            id,
            role: params.role,
            email,
            password_hash: params.password_hash,
            name: params.name.trim().to_string(),
            phone: params.phone,
            business_name: params.business_name,
            address: params.address,
            operating_hours: None,
            dietary_preferences: Vec::new(),
            rating: 0.0,
            total_ratings: 0,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        match filter {
            UserFilter::ByEmail(email) => self.email == *email,
        }
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(hours) = update.operating_hours {
            self.operating_hours = Some(hours);
        }
        if let Some(prefs) = update.dietary_preferences {
            self.dietary_preferences = prefs;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::RecordRating { rating } => {
                if self.role != Role::Restaurant {
                    return Err(UserError::Authorization(
                        "only restaurant accounts accumulate ratings".into(),
                    ));
                }
                if !(1..=5).contains(&rating) {
                    return Err(UserError::Validation(
                        "rating must be between 1 and 5".into(),
                    ));
                }
                let sum = self.rating * self.total_ratings as f64 + rating as f64;
                self.total_ratings += 1;
                self.rating = sum / self.total_ratings as f64;
                Ok(UserActionResult::RatingRecorded {
                    rating: self.rating,
                    total_ratings: self.total_ratings,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant_create() -> UserCreate {
        UserCreate {
            role: Role::Restaurant,
            email: "  Kitchen@Example.COM ".into(),
            password_hash: "hash".into(),
            name: "Mama Oliech".into(),
            phone: "+254700000001".into(),
            business_name: Some("Mama Oliech Restaurant".into()),
            address: None,
        }
    }

    #[test]
    fn email_is_normalized() {
        let user = User::from_create_params(UserId(1), restaurant_create()).unwrap();
        assert_eq!(user.email, "kitchen@example.com");
        assert_eq!(user.unique_key().unwrap(), "kitchen@example.com");
    }

    #[test]
    fn restaurant_without_business_name_is_rejected() {
        let mut params = restaurant_create();
        params.business_name = None;
        let err = User::from_create_params(UserId(1), params).unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
    }

    #[tokio::test]
    async fn rating_stays_the_arithmetic_mean() {
        let mut user = User::from_create_params(UserId(1), restaurant_create()).unwrap();

        for (rating, expected_mean, expected_count) in
            [(5, 5.0, 1), (3, 4.0, 2), (4, 4.0, 3), (1, 3.25, 4)]
        {
            user.handle_action(UserAction::RecordRating { rating }, &())
                .await
                .unwrap();
            assert!((user.rating - expected_mean).abs() < 1e-9);
            assert_eq!(user.total_ratings, expected_count);
        }
    }

    #[tokio::test]
    async fn customers_do_not_accumulate_ratings() {
        let mut params = restaurant_create();
        params.role = Role::Customer;
        params.business_name = None;
        let mut user = User::from_create_params(UserId(1), params).unwrap();

        let err = user
            .handle_action(UserAction::RecordRating { rating: 5 }, &())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Authorization(_)));
        assert_eq!(user.total_ratings, 0);
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected() {
        let mut user = User::from_create_params(UserId(1), restaurant_create()).unwrap();
        for rating in [0, 6] {
            let err = user
                .handle_action(UserAction::RecordRating { rating }, &())
                .await
                .unwrap_err();
            assert!(matches!(err, UserError::Validation(_)));
        }
        assert_eq!(user.total_ratings, 0);
    }
}
