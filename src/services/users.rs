use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::repository::{UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

/// Look up a user, mapping absence to [`ServiceError::NotFound`].
pub fn get_user<R>(user_id: UserId, repo: &R) -> ServiceResult<User>
where
    R: UserReader,
{
    match repo.get_user_by_id(user_id) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ServiceError::NotFound("user")),
        Err(e) => {
            log::error!("Failed to get user {user_id}: {e}");
            Err(ServiceError::ReadError)
        }
    }
}

pub fn list_users<R>(repo: &R) -> ServiceResult<Vec<User>>
where
    R: UserReader,
{
    repo.list_users().map_err(|e| {
        log::error!("Failed to list users: {e}");
        ServiceError::ReadError
    })
}

/// Create a user and return the identifier assigned by storage.
pub fn create_user<R>(user: NewUser, repo: &R) -> ServiceResult<UserId>
where
    R: UserWriter,
{
    match repo.create_user(&user) {
        Ok(created) => {
            log::info!("Created user {}", created.id);
            Ok(created.id)
        }
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::WriteError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UserName;
    use crate::repository::test::TestRepository;

    #[test]
    fn created_users_get_sequential_ids() {
        let repo = TestRepository::default();
        let first = create_user(
            NewUser {
                name: UserName::new("Alice").unwrap(),
            },
            &repo,
        )
        .unwrap();
        let second = create_user(
            NewUser {
                name: UserName::new("Bob").unwrap(),
            },
            &repo,
        )
        .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(get_user(second, &repo).unwrap().name, "Bob");
        assert_eq!(list_users(&repo).unwrap().len(), 2);
    }

    #[test]
    fn unknown_user_is_not_found() {
        let repo = TestRepository::default();
        let err = get_user(UserId::new(999_999).unwrap(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("user"));
    }
}
