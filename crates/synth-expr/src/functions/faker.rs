//! `faker.*` functions: realistic text drawn through the `fake` crate.
//!
//! All values come from the supplied rng. The same helpers back the builtin
//! text data types of the generator (`name`, `email`, `city`, ...).

use super::FunctionSpec;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, IPv4, SafeEmail};
use fake::faker::job::en::Title;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::RngCore;
use synth_core::Value;

macro_rules! faker_fn {
    ($fn_name:ident, $text:ident) => {
        fn $fn_name(mut rng: &mut dyn RngCore, _args: &[Value]) -> Result<Value, String> {
            Ok(Value::String($text(&mut rng)))
        }
    };
}

pub(crate) static FUNCTIONS: &[FunctionSpec] = &[
    faker_spec("faker.name", "Full person name", call_name),
    faker_spec("faker.first_name", "Given name", call_first_name),
    faker_spec("faker.last_name", "Family name", call_last_name),
    faker_spec("faker.email", "Email address on a reserved example domain", call_email),
    faker_spec("faker.phone", "Phone number", call_phone),
    faker_spec("faker.address", "Street address", call_address),
    faker_spec("faker.city", "City name", call_city),
    faker_spec("faker.country", "Country name", call_country),
    faker_spec("faker.zipcode", "Postal code", call_zipcode),
    faker_spec("faker.company", "Company name", call_company),
    faker_spec("faker.job", "Job title", call_job),
    faker_spec("faker.url", "Web URL", call_url),
    faker_spec("faker.ip", "IPv4 address", call_ip),
    faker_spec("faker.word", "Single lorem word", call_word),
    faker_spec("faker.sentence", "Short lorem sentence", call_sentence),
];

const fn faker_spec(
    name: &'static str,
    description: &'static str,
    call: super::FunctionImpl,
) -> FunctionSpec {
    FunctionSpec {
        name,
        min_args: 0,
        max_args: Some(0),
        signature: name,
        description,
        call,
    }
}

faker_fn!(call_name, name);
faker_fn!(call_first_name, first_name);
faker_fn!(call_last_name, last_name);
faker_fn!(call_email, email);
faker_fn!(call_phone, phone);
faker_fn!(call_address, address);
faker_fn!(call_city, city);
faker_fn!(call_country, country);
faker_fn!(call_zipcode, zipcode);
faker_fn!(call_company, company);
faker_fn!(call_job, job);
faker_fn!(call_url, url);
faker_fn!(call_ip, ip);
faker_fn!(call_word, word);
faker_fn!(call_sentence, sentence);

pub fn name<R: rand::Rng>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn first_name<R: rand::Rng>(rng: &mut R) -> String {
    FirstName().fake_with_rng(rng)
}

pub fn last_name<R: rand::Rng>(rng: &mut R) -> String {
    LastName().fake_with_rng(rng)
}

pub fn email<R: rand::Rng>(rng: &mut R) -> String {
    SafeEmail().fake_with_rng(rng)
}

pub fn phone<R: rand::Rng>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

pub fn address<R: rand::Rng>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

pub fn city<R: rand::Rng>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

pub fn country<R: rand::Rng>(rng: &mut R) -> String {
    CountryName().fake_with_rng(rng)
}

pub fn zipcode<R: rand::Rng>(rng: &mut R) -> String {
    ZipCode().fake_with_rng(rng)
}

pub fn company<R: rand::Rng>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

pub fn job<R: rand::Rng>(rng: &mut R) -> String {
    Title().fake_with_rng(rng)
}

pub fn url<R: rand::Rng>(rng: &mut R) -> String {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!("https://www.{}.{suffix}", host.to_lowercase())
}

pub fn ip<R: rand::Rng>(rng: &mut R) -> String {
    IPv4().fake_with_rng(rng)
}

pub fn word<R: rand::Rng>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

pub fn sentence<R: rand::Rng>(rng: &mut R) -> String {
    Sentence(3..8).fake_with_rng(rng)
}
