use crate::domain::role::Role;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Every page the portal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    NotFound,
    AdminDashboard,
    AdminStudents,
    AdminCourses,
    AdminSupervisors,
    AdminTrainingSites,
    AdminStudentLevels,
    AdminReports,
    AdminSettings,
    SupervisorDashboard,
    SupervisorStudents,
    SupervisorEvaluations,
    StudentDashboard,
    StudentCourses,
    StudentResults,
}

impl Page {
    /// Pages that sit behind a role guard.
    pub const GUARDED: [Page; 14] = [
        Page::AdminDashboard,
        Page::AdminStudents,
        Page::AdminCourses,
        Page::AdminSupervisors,
        Page::AdminTrainingSites,
        Page::AdminStudentLevels,
        Page::AdminReports,
        Page::AdminSettings,
        Page::SupervisorDashboard,
        Page::SupervisorStudents,
        Page::SupervisorEvaluations,
        Page::StudentDashboard,
        Page::StudentCourses,
        Page::StudentResults,
    ];

    pub fn path(&self) -> Option<&'static str> {
        let path = match self {
            Page::Login => LOGIN_PATH,
            Page::NotFound => return None,
            Page::AdminDashboard => "/admin/dashboard",
            Page::AdminStudents => "/admin/students",
            Page::AdminCourses => "/admin/courses",
            Page::AdminSupervisors => "/admin/supervisors",
            Page::AdminTrainingSites => "/admin/training-sites",
            Page::AdminStudentLevels => "/admin/student-levels",
            Page::AdminReports => "/admin/reports",
            Page::AdminSettings => "/admin/settings",
            Page::SupervisorDashboard => "/supervisor/dashboard",
            Page::SupervisorStudents => "/supervisor/students",
            Page::SupervisorEvaluations => "/supervisor/evaluations",
            Page::StudentDashboard => "/student/dashboard",
            Page::StudentCourses => "/student/courses",
            Page::StudentResults => "/student/results",
        };
        Some(path)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Sign in",
            Page::NotFound => "Page not found",
            Page::AdminDashboard => "Admin Dashboard",
            Page::AdminStudents => "Students",
            Page::AdminCourses => "Courses",
            Page::AdminSupervisors => "Supervisors",
            Page::AdminTrainingSites => "Training Sites",
            Page::AdminStudentLevels => "Student Levels",
            Page::AdminReports => "Reports",
            Page::AdminSettings => "Settings",
            Page::SupervisorDashboard => "Supervisor Dashboard",
            Page::SupervisorStudents => "My Students",
            Page::SupervisorEvaluations => "Evaluations",
            Page::StudentDashboard => "Student Dashboard",
            Page::StudentCourses => "My Courses",
            Page::StudentResults => "My Results",
        }
    }

    /// Role whose guard wraps this page, `None` for public pages.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Page::Login | Page::NotFound => None,
            Page::AdminDashboard
            | Page::AdminStudents
            | Page::AdminCourses
            | Page::AdminSupervisors
            | Page::AdminTrainingSites
            | Page::AdminStudentLevels
            | Page::AdminReports
            | Page::AdminSettings => Some(Role::Admin),
            Page::SupervisorDashboard | Page::SupervisorStudents | Page::SupervisorEvaluations => {
                Some(Role::Supervisor)
            }
            Page::StudentDashboard | Page::StudentCourses | Page::StudentResults => {
                Some(Role::Student)
            }
        }
    }

    pub fn dashboard(role: Role) -> Page {
        match role {
            Role::Admin => Page::AdminDashboard,
            Role::Supervisor => Page::SupervisorDashboard,
            Role::Student => Page::StudentDashboard,
        }
    }

    /// Resolves a request path. Trailing slashes are ignored; `/` is not a
    /// page of its own and resolves to `None` like any unknown path.
    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        std::iter::once(Page::Login)
            .chain(Page::GUARDED)
            .find(|page| page.path() == Some(trimmed))
    }

    /// Guarded pages belonging to one role, in navigation order.
    pub fn for_role(role: Role) -> impl Iterator<Item = Page> {
        Page::GUARDED
            .into_iter()
            .filter(move |page| page.required_role() == Some(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_guarded_page_has_a_path_and_role() {
        for page in Page::GUARDED {
            let path = page.path().expect("guarded page without path");
            assert_eq!(Page::from_path(path), Some(page));
            assert!(page.required_role().is_some());
        }
    }

    #[test]
    fn dashboards_match_role_paths() {
        for role in Role::ALL {
            assert_eq!(Page::dashboard(role).path(), Some(role.dashboard_path()));
            assert_eq!(Page::dashboard(role).required_role(), Some(role));
        }
    }

    #[test]
    fn unknown_and_root_paths_do_not_resolve() {
        assert_eq!(Page::from_path("/"), None);
        assert_eq!(Page::from_path("/admin"), None);
        assert_eq!(Page::from_path("/admin/unknown"), None);
        assert_eq!(Page::from_path("/login/"), Some(Page::Login));
    }

    #[test]
    fn role_page_counts() {
        assert_eq!(Page::for_role(Role::Admin).count(), 8);
        assert_eq!(Page::for_role(Role::Supervisor).count(), 3);
        assert_eq!(Page::for_role(Role::Student).count(), 3);
    }
}
