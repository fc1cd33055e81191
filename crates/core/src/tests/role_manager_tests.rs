// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{ALICE, PROFESSOR, STRANGER, user};
use crate::{CoreError, RoleManager};
use gradebook_domain::{DomainError, Permission, PermissionSet, Role, UserId};
use std::collections::{BTreeMap, BTreeSet};

#[test]
fn test_unknown_user_is_an_error_not_an_empty_set() {
    let manager: RoleManager = RoleManager::new();

    let result: Result<PermissionSet, CoreError> = manager.get_perms(&user(STRANGER));

    assert_eq!(result, Err(CoreError::UnknownUser(user(STRANGER))));
    assert!(manager.get_roles(&user(STRANGER)).is_err());
    assert!(!manager.has_role(&user(STRANGER), Role::Student));
}

#[test]
fn test_permissions_are_the_union_of_held_roles() {
    let mut manager: RoleManager = RoleManager::new();
    let alice: UserId = user(ALICE);
    manager.grant_role(&alice, Role::Student).unwrap();

    let as_student: PermissionSet = manager.get_perms(&alice).unwrap();
    assert!(as_student.contains(Permission::AddAssignmentSubmission));
    assert!(!as_student.contains(Permission::AccessAssignmentGrade));

    manager.grant_role(&alice, Role::TeachingAssistant).unwrap();
    let combined: PermissionSet = manager.get_perms(&alice).unwrap();

    assert!(combined.contains(Permission::AddAssignmentSubmission));
    assert!(combined.contains(Permission::AccessAssignmentGrade));
    assert_eq!(
        manager.get_roles(&alice).unwrap(),
        BTreeSet::from([Role::Student, Role::TeachingAssistant])
    );
}

#[test]
fn test_professor_holds_every_permission() {
    let mut manager: RoleManager = RoleManager::new();
    manager.grant_role(&user(PROFESSOR), Role::Professor).unwrap();

    let perms: PermissionSet = manager.get_perms(&user(PROFESSOR)).unwrap();

    assert!(Permission::ALL.into_iter().all(|p| perms.contains(p)));
}

#[test]
fn test_granting_a_held_role_fails() {
    let mut manager: RoleManager = RoleManager::new();
    manager.grant_role(&user(ALICE), Role::Student).unwrap();

    let result: Result<(), CoreError> = manager.grant_role(&user(ALICE), Role::Student);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::RoleAlreadyGranted { .. }))
    ));
}

#[test]
fn test_granting_to_an_invalid_id_fails() {
    let mut manager: RoleManager = RoleManager::new();

    let result: Result<(), CoreError> = manager.grant_role(&user(""), Role::Student);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidUserId(_)))
    ));
    assert_eq!(manager.users().count(), 0);
}

#[test]
fn test_revoking_the_last_role_unregisters_the_user() {
    let mut manager: RoleManager = RoleManager::new();
    manager.grant_role(&user(ALICE), Role::Student).unwrap();

    manager.revoke_role(&user(ALICE), Role::Student).unwrap();

    assert!(!manager.is_registered(&user(ALICE)));
    assert_eq!(
        manager.get_perms(&user(ALICE)),
        Err(CoreError::UnknownUser(user(ALICE)))
    );
}

#[test]
fn test_revoking_a_role_not_held_fails() {
    let mut manager: RoleManager = RoleManager::new();
    manager.grant_role(&user(ALICE), Role::Student).unwrap();

    let not_held: Result<(), CoreError> = manager.revoke_role(&user(ALICE), Role::Professor);
    let unknown: Result<(), CoreError> = manager.revoke_role(&user(STRANGER), Role::Student);

    assert!(matches!(
        not_held,
        Err(CoreError::DomainViolation(DomainError::RoleNotHeld { .. }))
    ));
    assert_eq!(unknown, Err(CoreError::UnknownUser(user(STRANGER))));
    assert!(manager.has_role(&user(ALICE), Role::Student));
}

#[test]
fn test_custom_grants_replace_the_default_table() {
    let grants: BTreeMap<Role, PermissionSet> = BTreeMap::from([(
        Role::Student,
        PermissionSet::new([Permission::AccessCourseName]),
    )]);
    let mut manager: RoleManager = RoleManager::with_grants(grants);
    manager.grant_role(&user(ALICE), Role::Student).unwrap();
    manager.grant_role(&user(PROFESSOR), Role::Professor).unwrap();

    assert_eq!(
        manager.get_perms(&user(ALICE)).unwrap(),
        PermissionSet::new([Permission::AccessCourseName])
    );
    assert!(manager.get_perms(&user(PROFESSOR)).unwrap().is_empty());
}
