use nom::{
    character::complete::{i32, line_ending, space0, space1},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};

pub(crate) fn double_entry(line: &str) -> IResult<&str, f64> {
    preceded(space1, double)(line)
}

pub(crate) fn i32_entry(line: &str) -> IResult<&str, i32> {
    preceded(space1, i32)(line)
}

/// First integer of a line, allowing leading whitespace
pub(crate) fn leading_i32(line: &str) -> IResult<&str, i32> {
    preceded(space0, i32)(line)
}

/// Succeeds only if nothing but whitespace is left
pub(crate) fn line_end(line: &str) -> IResult<&str, &str> {
    all_consuming(terminated(space0, opt(line_ending)))(line)
}
