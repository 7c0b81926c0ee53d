use tempora::{
    CalendarWeek, ChronoHistory, HistoricCalendar, LeapSeconds, MachineScale, Moment, PlainDate,
    TimeScale,
};

fn main() -> Result<(), tempora::TimeError> {
    let leaps = LeapSeconds::shared();
    let now = Moment::now();

    println!("now:        {now}");
    println!("MJD (UTC):  {}", now.modified_julian_date(TimeScale::Utc, &leaps));
    println!("JD (TT):    {}", now.julian_day(TimeScale::Tt, &leaps));
    println!("TAI - UTC:  {} s", leaps.tai_minus_utc(now.posix_seconds()));
    println!("leap table: {} events from {}", leaps.len(), leaps.provider_name());

    let today = now.to_utc_timestamp().date();
    println!("week:       {}", CalendarWeek::from_date(today));

    let leap: Moment = "2016-12-31T23:59:60Z".parse()?;
    let after: Moment = "2017-01-01T00:00Z".parse()?;
    println!(
        "{leap} .. {after}: {} SI, {} POSIX",
        leap.until(&after, MachineScale::Utc, &leaps)?,
        leap.until(&after, MachineScale::Posix, &leaps)?,
    );

    let england = ChronoHistory::for_region("GB");
    let cal = HistoricCalendar::from_gregorian(england, PlainDate::of(1752, 9, 14)?)?;
    println!("1752-09-14 in {}: {cal}, previous day {}", cal.variant(), cal.minus_days(1)?);
    Ok(())
}
