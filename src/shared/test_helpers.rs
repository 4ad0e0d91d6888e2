#[cfg(test)]
use crate::features::auth::model::{Employee, Role};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, Router};

#[cfg(test)]
pub fn create_admin_employee() -> Employee {
    Employee {
        code: "A001".to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
    }
}

#[cfg(test)]
pub fn create_general_employee(code: &str, name: &str) -> Employee {
    Employee {
        code: code.to_string(),
        name: name.to_string(),
        role: Role::General,
    }
}

/// Layer that authenticates every request as `employee`
#[cfg(test)]
pub fn with_employee_auth(router: Router, employee: Employee) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let employee = employee.clone();
            async move {
                request.extensions_mut().insert(employee);
                next.run(request).await
            }
        },
    ))
}
