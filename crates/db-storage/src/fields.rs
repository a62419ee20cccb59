// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! The closed set of user profile attributes
//!
//! Required fields and form submissions refer to attributes by their camelCase name
//! (e.g. `birthDate`). [`ProfileField`] is the typed counterpart of such a name.
use std::fmt;
use std::str::FromStr;

/// A profile attribute of a [`User`](crate::users::User)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    BirthDate,
    BirthPlace,
    Sex,
    CurrentAddress,
}

impl ProfileField {
    /// All attributes in their canonical order
    pub const ALL: [ProfileField; 6] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::BirthDate,
        ProfileField::BirthPlace,
        ProfileField::Sex,
        ProfileField::CurrentAddress,
    ];

    /// The name used in the API and in the `required_fields` table
    pub const fn as_str(self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::BirthDate => "birthDate",
            ProfileField::BirthPlace => "birthPlace",
            ProfileField::Sex => "sex",
            ProfileField::CurrentAddress => "currentAddress",
        }
    }

    /// Returns true if the attribute can be changed through a form submission.
    ///
    /// The name of a user is fixed once the user exists.
    pub const fn is_form_updatable(self) -> bool {
        match self {
            ProfileField::FirstName | ProfileField::LastName => false,
            ProfileField::BirthDate
            | ProfileField::BirthPlace
            | ProfileField::Sex
            | ProfileField::CurrentAddress => true,
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown profile field `{0}`")]
pub struct UnknownProfileField(pub String);

impl FromStr for ProfileField {
    type Err = UnknownProfileField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownProfileField(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_every_canonical_name() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>(), Ok(field));
        }
    }

    #[test]
    fn parsing_is_exact() {
        assert!("birthdate".parse::<ProfileField>().is_err());
        assert!("birth_date".parse::<ProfileField>().is_err());
        assert!(" sex".parse::<ProfileField>().is_err());
        assert_eq!(
            "bogusField".parse::<ProfileField>(),
            Err(UnknownProfileField("bogusField".into()))
        );
    }

    #[test]
    fn names_are_not_form_updatable() {
        let updatable: Vec<_> = ProfileField::ALL
            .into_iter()
            .filter(|field| field.is_form_updatable())
            .collect();

        assert_eq!(
            updatable,
            [
                ProfileField::BirthDate,
                ProfileField::BirthPlace,
                ProfileField::Sex,
                ProfileField::CurrentAddress
            ]
        );
    }
}
