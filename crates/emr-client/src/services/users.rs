use super::{PageRequest, USER_PAGE_SIZE};
use crate::error::ApiResult;
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Paginated, User};

const USERS: &str = "/pengguna";

pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request(role: Option<&str>, page: PageRequest) -> ApiRequest {
        ApiRequest::get(USERS)
            .query_opt("role", role)
            .query("page", page.page)
            .query("page_size", page.page_size)
    }

    pub async fn list(&self, role: Option<&str>, page: PageRequest) -> ApiResult<Paginated<User>> {
        self.client.send_json(Self::list_request(role, page)).await
    }

    /// First page of users holding `role`, sized for a picker
    pub async fn by_role(&self, role: &str) -> ApiResult<Vec<User>> {
        Ok(self.list(Some(role), PageRequest::first(USER_PAGE_SIZE)).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request() {
        let request = UserService::list_request(Some("doctor"), PageRequest::first(USER_PAGE_SIZE));
        assert_eq!(request.query_string(), "role=doctor&page=1&page_size=100");
        let request = UserService::list_request(None, PageRequest::first(USER_PAGE_SIZE));
        assert_eq!(request.query_value("role"), None);
    }
}
